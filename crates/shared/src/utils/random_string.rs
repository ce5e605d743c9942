use rand::Rng;

const CHARACTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_random_string(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARACTERS.len());
            CHARACTERS[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate_random_string(10).len(), 10);
        assert_eq!(generate_random_string(0).len(), 0);
    }

    #[test]
    fn uses_only_alphanumerics() {
        let s = generate_random_string(64);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
