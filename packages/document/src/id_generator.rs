/// Fresh page id (UUID v4)
pub fn new_page_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Sequential id generator for sections, rows and widgets
///
/// Ids are `<seed>-<n>`. The seed is random per editing session so ids minted in
/// different sessions against the same page do not collide.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        let seed = uuid::Uuid::new_v4().simple().to_string();
        Self::from_seed(seed[..8].to_string())
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Generate the next id for which `taken` is false
    pub fn new_unique_id(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.new_id();
            if !taken(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("abc");
        assert_eq!(gen.new_id(), "abc-1");
        assert_eq!(gen.new_id(), "abc-2");
        assert_eq!(gen.seed(), "abc");
    }

    #[test]
    fn test_unique_id_skips_taken() {
        let mut gen = IdGenerator::from_seed("abc");
        let id = gen.new_unique_id(|id| id == "abc-1" || id == "abc-2");
        assert_eq!(id, "abc-3");
    }

    #[test]
    fn test_random_seeds_differ() {
        let a = IdGenerator::new();
        let b = IdGenerator::new();
        assert_eq!(a.seed().len(), 8);
        assert_ne!(a.seed(), b.seed());
    }

    #[test]
    fn test_page_ids_are_uuids() {
        assert!(uuid::Uuid::parse_str(&new_page_id()).is_ok());
    }
}
