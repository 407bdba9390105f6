use passkeep::{CredentialStore, Error, Generator, GeneratorOptions};
use tempfile::TempDir;

#[test]
fn generated_password_round_trips_through_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("passwords.json");

    let password = Generator::default()
        .generate(&GeneratorOptions::default())
        .unwrap();
    assert_eq!(password.chars().count(), 12);

    let mut store = CredentialStore::open(&path).unwrap();
    store.store("github", "bob", &password, "master").unwrap();

    let reopened = CredentialStore::open(&path).unwrap();
    assert!(reopened.verify("github", &password, "master"));
    assert!(!reopened.verify("github", &password, "other"));
}

#[test]
fn master_secret_binding_across_calls() {
    let dir = TempDir::new().unwrap();
    let mut store = CredentialStore::open(dir.path().join("passwords.json")).unwrap();

    store.store("svc1", "u", "p", "M1").unwrap();
    assert!(matches!(
        store.store("svc2", "u2", "p2", "M2"),
        Err(Error::WrongMasterSecret)
    ));
    store.store("svc2", "u2", "p2", "M1").unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn verify_outcomes() {
    let dir = TempDir::new().unwrap();
    let mut store = CredentialStore::open(dir.path().join("passwords.json")).unwrap();
    store.store("github", "bob", "Secr3t!", "master").unwrap();

    assert!(store.verify("github", "Secr3t!", "master"));
    assert!(!store.verify("github", "wrong", "master"));
    assert!(!store.verify("github", "Secr3t!", "wrongmaster"));
    assert!(!store.verify("absent", "x", "master"));
}

#[test]
fn substring_search_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let mut store = CredentialStore::open(dir.path().join("passwords.json")).unwrap();
    for svc in ["github", "gitlab", "yandex"] {
        store.store(svc, "user", "pw", "master").unwrap();
    }

    let lower: Vec<_> = store.find_by_service_substring("git").into_keys().collect();
    let upper: Vec<_> = store.find_by_service_substring("GIT").into_keys().collect();
    assert_eq!(lower, vec!["github", "gitlab"]);
    assert_eq!(lower, upper);
    assert!(store.find_by_service_substring("zzz").is_empty());
}

#[test]
fn persistence_round_trip_keeps_every_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("passwords.json");
    let services = [("github", "a1"), ("gitlab", "b2"), ("yandex", "c3")];

    let mut store = CredentialStore::open(&path).unwrap();
    for (svc, pw) in services {
        store.store(svc, "user", pw, "master").unwrap();
    }

    let reopened = CredentialStore::open(&path).unwrap();
    for (svc, pw) in services {
        assert_eq!(
            store.verify(svc, pw, "master"),
            reopened.verify(svc, pw, "master")
        );
        assert!(reopened.verify(svc, pw, "master"));
    }
    assert_eq!(
        store.find_by_service_substring(""),
        reopened.find_by_service_substring("")
    );
}

#[test]
fn short_length_with_all_classes_is_rejected() {
    let opts = GeneratorOptions {
        length: 2,
        uppercase: true,
        digits: true,
        special: true,
    };
    assert!(matches!(
        Generator::default().generate(&opts),
        Err(Error::InvalidLength { length: 2, required: 3 })
    ));
}
