//! Random character identity generation.

use rand::Rng;

use crate::entities::{Character, StatVector};
use crate::error::CatalogError;

/// Draws names, classes and portraits from fixed pools.
///
/// Names are composed of a first part and a suffix (`Zort` + `blob`).
#[derive(Debug, Clone)]
pub struct CharacterGenerator {
    first_names: Vec<String>,
    name_suffixes: Vec<String>,
    classes: Vec<String>,
    image_refs: Vec<String>,
}

impl CharacterGenerator {
    /// Create a generator. Every pool must be non-empty and contain no
    /// empty strings.
    pub fn new(
        first_names: Vec<String>,
        name_suffixes: Vec<String>,
        classes: Vec<String>,
        image_refs: Vec<String>,
    ) -> Result<Self, CatalogError> {
        check_pool("first_names", &first_names)?;
        check_pool("name_suffixes", &name_suffixes)?;
        check_pool("classes", &classes)?;
        check_pool("images", &image_refs)?;

        Ok(Self {
            first_names,
            name_suffixes,
            classes,
            image_refs,
        })
    }

    pub fn generate_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        format!(
            "{}{}",
            pick(&self.first_names, rng),
            pick(&self.name_suffixes, rng)
        )
    }

    pub fn generate_class<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        pick(&self.classes, rng).to_string()
    }

    pub fn generate_image_ref<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        pick(&self.image_refs, rng).to_string()
    }

    /// Create a character with a random identity and the given stats.
    pub fn generate<R: Rng + ?Sized>(&self, stats: StatVector, rng: &mut R) -> Character {
        let name = self.generate_name(rng);
        let class = self.generate_class(rng);
        let image_ref = self.generate_image_ref(rng);
        Character::new(stats, name, class, image_ref)
    }
}

fn check_pool(section: &'static str, pool: &[String]) -> Result<(), CatalogError> {
    if pool.is_empty() {
        return Err(CatalogError::EmptySection(section));
    }
    if pool.iter().any(|entry| entry.trim().is_empty()) {
        return Err(CatalogError::EmptyEntry(section));
    }
    Ok(())
}

// Pools are checked non-empty on construction.
fn pick<'a, R: Rng + ?Sized>(pool: &'a [String], rng: &mut R) -> &'a str {
    &pool[rng.gen_range(0..pool.len())]
}
