//! Owner: availability window plus the pets being cared for.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::pet::Pet;
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    /// Window start, hour of day. Not validated against `available_end_hour`.
    pub available_start_hour: i32,
    /// Window end (exclusive), hour of day.
    pub available_end_hour: i32,
    #[serde(default)]
    pub preferences: BTreeMap<String, String>,
    #[serde(default)]
    pets: Vec<Pet>,
}

impl Owner {
    /// New owner with the default 08:00-20:00 window.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_window(name, 8, 20)
    }

    pub fn with_window(name: impl Into<String>, start_hour: i32, end_hour: i32) -> Self {
        Self {
            name: name.into(),
            available_start_hour: start_hour,
            available_end_hour: end_hour,
            preferences: BTreeMap::new(),
            pets: Vec::new(),
        }
    }

    /// Rename the owner and every pet's copy of the name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        for pet in &mut self.pets {
            pet.owner_name = self.name.clone();
        }
    }

    pub fn available_time(&self) -> (i32, i32) {
        (self.available_start_hour, self.available_end_hour)
    }

    pub fn set_availability(&mut self, start_hour: i32, end_hour: i32) {
        self.available_start_hour = start_hour;
        self.available_end_hour = end_hour;
    }

    /// The window clamped to a single day, 00:00-24:00.
    pub fn day_window(&self) -> (i32, i32) {
        (
            self.available_start_hour.clamp(0, 24),
            self.available_end_hour.clamp(0, 24),
        )
    }

    /// Window length in minutes within the day; inverted or empty windows give zero.
    pub fn capacity_minutes(&self) -> i64 {
        let (start, end) = self.day_window();
        (i64::from(end) - i64::from(start)).max(0) * 60
    }

    pub fn update_preferences(&mut self, prefs: impl IntoIterator<Item = (String, String)>) {
        self.preferences.extend(prefs);
    }

    /// Add a pet. The pet's owner name is rewritten to this owner.
    pub fn add_pet(&mut self, mut pet: Pet) {
        pet.owner_name = self.name.clone();
        self.pets.push(pet);
    }

    /// Remove the first pet with exactly this name.
    pub fn remove_pet(&mut self, name: &str) -> Option<Pet> {
        let idx = self.pets.iter().position(|p| p.name == name)?;
        Some(self.pets.remove(idx))
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// First pet whose name matches, ignoring case.
    pub fn pet(&self, name: &str) -> Option<&Pet> {
        self.pets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn pet_mut(&mut self, name: &str) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub(crate) fn pets_mut(&mut self) -> &mut [Pet] {
        &mut self.pets
    }

    /// Every task, in pet order then per-pet insertion order.
    pub fn all_tasks(&self) -> Vec<&Task> {
        self.pets.iter().flat_map(|p| p.tasks().iter()).collect()
    }

    /// Complete a task on the named pet (first pet match, then first title match).
    pub fn mark_task_complete(&mut self, pet_name: &str, title: &str) -> bool {
        self.pet_mut(pet_name)
            .map(|p| p.mark_task_complete(title))
            .unwrap_or(false)
    }
}
