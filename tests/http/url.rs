use picohttp::network::application::http::Error;
use picohttp::network::application::http::url::{
    decode, decode_to_vec, decoded_len, encode, encode_to_string, encoded_len, is_escaped,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_bytes(rng: &mut StdRng) -> Vec<u8> {
    let len = rng.gen_range(0..64);
    (0..len).map(|_| rng.r#gen::<u8>()).collect()
}

fn random_ascii_with_escapes(rng: &mut StdRng) -> Vec<u8> {
    const POOL: &[u8] = b"abcXYZ019-._ $&+,/:;=?@\"<>#%{}|\\^~[]`";
    let len = rng.gen_range(0..64);
    (0..len)
        .map(|_| POOL[rng.gen_range(0..POOL.len())])
        .collect()
}

#[test]
fn test_escape_set() {
    for byte in b" $&+,/:;=?@\"<>#%{}|\\^~[]`" {
        assert!(is_escaped(*byte), "{:?} should be escaped", *byte as char);
    }
    for byte in b"azAZ09-._*!'()" {
        assert!(!is_escaped(*byte), "{:?} should pass through", *byte as char);
    }
    assert_eq!((0..=255u8).filter(|&b| is_escaped(b)).count(), 25);
}

#[test]
fn test_encode_known_values() {
    let mut dest = [0xFFu8; 64];
    let n = encode(b"a b&c=d/e%f", &mut dest).unwrap();
    assert_eq!(&dest[..n], b"a%20b%26c%3Dd%2Fe%25f");
    assert_eq!(dest[n], 0);
}

#[test]
fn test_encode_len_includes_terminator() {
    assert_eq!(encoded_len(b""), 1);
    assert_eq!(encoded_len(b"abc"), 4);
    assert_eq!(encoded_len(b"a b"), 6);
    assert_eq!(encoded_len(b"%%"), 7);
}

#[test]
fn test_encode_rejects_short_buffer() {
    let mut dest = [0xFFu8; 5];
    assert_eq!(encode(b"a b", &mut dest), Err(Error::BufferTooSmall));
    assert_eq!(dest, [0xFF; 5]);

    let mut exact = [0u8; 6];
    assert_eq!(encode(b"a b", &mut exact), Ok(5));
}

#[test]
fn test_decode_known_values() {
    let mut dest = [0xFFu8; 32];
    let n = decode(b"temp%3D21.5%26unit%3dC", &mut dest).unwrap();
    assert_eq!(&dest[..n], b"temp=21.5&unit=C");
    assert_eq!(dest[n], 0);

    let n = decode(b"%7e%7E", &mut dest).unwrap();
    assert_eq!(&dest[..n], b"~~");
}

#[test]
fn test_decode_invalid_escapes() {
    let mut dest = [0u8; 16];
    assert_eq!(decode(b"%G1", &mut dest), Err(Error::InvalidEscape));
    assert_eq!(decode(b"abc%4", &mut dest), Err(Error::InvalidEscape));
    assert_eq!(decode(b"abc%", &mut dest), Err(Error::InvalidEscape));
    assert_eq!(decode_to_vec::<16>(b"1%2"), Err(Error::InvalidEscape));
}

#[test]
fn test_decode_len() {
    assert_eq!(decoded_len(b""), 1);
    assert_eq!(decoded_len(b"abc"), 4);
    assert_eq!(decoded_len(b"%20"), 2);
    assert_eq!(decoded_len(b"a%20b%2F"), 5);
    // a lone percent still counts as an escape
    assert_eq!(decoded_len(b"%"), 1);
}

#[test]
fn test_decode_rejects_short_buffer() {
    let mut dest = [0u8; 2];
    assert_eq!(decode(b"a%20b", &mut dest), Err(Error::BufferTooSmall));
}

#[test]
fn test_round_trip_random_bytes() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..500 {
        let src = random_bytes(&mut rng);

        let mut encoded = vec![0u8; encoded_len(&src)];
        let n = encode(&src, &mut encoded).unwrap();
        assert_eq!(n + 1, encoded.len());

        let mut decoded = vec![0u8; decoded_len(&encoded[..n])];
        let m = decode(&encoded[..n], &mut decoded).unwrap();
        assert_eq!(m + 1, decoded.len());
        assert_eq!(&decoded[..m], &src[..]);
    }
}

#[test]
fn test_round_trip_escape_heavy_strings() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let src = random_ascii_with_escapes(&mut rng);
        let text = std::str::from_utf8(&src).unwrap();

        let encoded = encode_to_string::<256>(text).unwrap();
        assert_eq!(encoded.len() + 1, encoded_len(&src));
        assert!(!encoded.bytes().any(|b| b != b'%' && is_escaped(b)));

        let decoded = decode_to_vec::<256>(encoded.as_bytes()).unwrap();
        assert_eq!(&decoded[..], &src[..]);
    }
}

#[test]
fn test_encode_to_string_keeps_utf8() {
    let encoded = encode_to_string::<64>("caf\u{e9} au lait").unwrap();
    assert_eq!(encoded.as_str(), "caf\u{e9}%20au%20lait");
}

#[test]
fn test_fixed_capacity_overflow() {
    assert_eq!(encode_to_string::<4>("a b"), Err(Error::BufferTooSmall));
    assert_eq!(decode_to_vec::<2>(b"abc"), Err(Error::BufferTooSmall));
}
