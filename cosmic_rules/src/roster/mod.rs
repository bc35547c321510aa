//! Roster - the in-memory registry of characters created this session.

use std::collections::HashMap;

use crate::entities::{Character, CharacterId};

/// Characters known to the current process, newest last.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: HashMap<CharacterId, Character>,
    order: Vec<CharacterId>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a roster seeded with existing characters, in order.
    pub fn with_characters(characters: impl IntoIterator<Item = Character>) -> Self {
        let mut roster = Self::new();
        for character in characters {
            roster.add_character(character);
        }
        roster
    }

    /// Add a character. Re-adding an existing id replaces it and moves it to
    /// the newest position.
    pub fn add_character(&mut self, character: Character) -> CharacterId {
        let id = character.id;
        if self.characters.insert(id, character).is_some() {
            self.order.retain(|existing| *existing != id);
        }
        self.order.push(id);
        id
    }

    /// Get character by ID.
    pub fn get_character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Get mutable character by ID.
    pub fn get_character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Remove a character from the roster.
    pub fn remove_character(&mut self, id: CharacterId) -> Option<Character> {
        let removed = self.characters.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(removed)
    }

    /// Up to `limit` characters, newest first.
    pub fn latest(&self, limit: usize) -> Vec<&Character> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.characters.get(id))
            .take(limit)
            .collect()
    }

    /// Find a character by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        self.order
            .iter()
            .filter_map(|id| self.characters.get(id))
            .find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
