use rowhash::{HashFunction, digest};

#[test]
fn raw_is_identity() {
    assert_eq!(digest("Acme-123-456", HashFunction::Raw), "Acme-123-456");
    assert_eq!(digest("", HashFunction::Raw), "");
}

#[test]
fn md5_is_lowercase_hex() {
    assert_eq!(
        digest("Acme-123-456", HashFunction::Md5),
        "2e5e8de3ad674f4c36b46fce464fd578"
    );
    assert_eq!(
        HashFunction::Md5.digest(""),
        "d41d8cd98f00b204e9800998ecf8427e"
    );

    let hash = digest("Main St", HashFunction::Md5);
    assert_eq!(hash.len(), 32);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn function_names_parse_exactly() {
    assert_eq!("md5".parse::<HashFunction>(), Ok(HashFunction::Md5));
    assert_eq!("raw".parse::<HashFunction>(), Ok(HashFunction::Raw));
    assert_eq!("MD5".parse::<HashFunction>(), Err("MD5".to_string()));
    assert_eq!("sha1".parse::<HashFunction>(), Err("sha1".to_string()));
    assert_eq!(HashFunction::default(), HashFunction::Md5);
    assert_eq!(HashFunction::Raw.to_string(), "raw");
}
