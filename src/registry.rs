//! Fixed-capacity, insertion-ordered cue storage
//!
//! The insertion position is the address used by `launch`. Slots are never
//! shifted: removing a cue blanks its slot instead.

#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::Vec;

use crate::cue::Cue;
use crate::error::{Error, Result};

/// Ordered collection of cues
///
/// N is the maximum number of cues
#[derive(Debug, Clone, Default)]
pub struct CueRegistry<const N: usize> {
    cues: Vec<Cue, N>,
}

impl<const N: usize> CueRegistry<N> {
    pub const fn new() -> Self {
        Self { cues: Vec::new() }
    }

    /// Append a cue
    ///
    /// Returns the index of the new cue, which equals the previous length.
    pub fn add(&mut self, cue: Cue) -> Result<usize> {
        let index = self.cues.len();
        self.cues
            .push(cue)
            .map_err(|_| Error::RegistryFull { capacity: N })?;
        #[cfg(feature = "esp32-log")]
        println!("[registry] added cue {}", index);
        Ok(index)
    }

    /// Get the cue stored at `index`
    pub fn get(&self, index: usize) -> Result<&Cue> {
        self.cues.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.cues.len(),
        })
    }

    /// Overwrite the cue at `index`, returning the previous one
    pub fn replace(&mut self, index: usize, cue: Cue) -> Result<Cue> {
        let len = self.cues.len();
        let slot = self
            .cues
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        Ok(core::mem::replace(slot, cue))
    }

    /// Blank the slot at `index`
    ///
    /// The slot keeps its index and now holds [`Cue::blackout`]; later cues
    /// keep theirs.
    pub fn remove(&mut self, index: usize) -> Result<Cue> {
        let removed = self.replace(index, Cue::blackout())?;
        #[cfg(feature = "esp32-log")]
        println!("[registry] blanked cue {}", index);
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Cue> {
        self.cues.iter()
    }
}

impl<'a, const N: usize> IntoIterator for &'a CueRegistry<N> {
    type Item = &'a Cue;
    type IntoIter = core::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}
