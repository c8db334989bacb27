use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LEN: usize = 6;

/// Generates a short id: base-36 milliseconds since the epoch followed by
/// six random base-36 characters. Ids from one process sort by creation time.
#[must_use]
pub fn uid() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let mut id = to_base36(millis);

    let mut rng = rand::thread_rng();
    for _ in 0..RANDOM_SUFFIX_LEN {
        id.push(BASE36[rng.gen_range(0..BASE36.len())] as char);
    }
    id
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Today's calendar day. Days are bucketed in UTC.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
