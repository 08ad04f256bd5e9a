use crate::core::{Texture, TextureFilter, WrapMode};
use crate::procedural::digit_texture;
use crate::sim::WatchState;

/// Which readout a cached digit texture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitSlot {
    Time,
    Bpm,
    Battery,
}

/// A digit texture and the string it was rendered from.
#[derive(Debug)]
struct Entry {
    key: String,
    texture: Texture,
    regenerations: u32,
}

impl Entry {
    fn empty(slot: DigitSlot) -> Self {
        Self {
            key: String::new(),
            texture: render(slot, ""),
            regenerations: 0,
        }
    }

    /// Re-renders only when `key` differs from the cached one.
    fn refresh(&mut self, slot: DigitSlot, key: String) -> bool {
        if self.key == key {
            return false;
        }
        self.texture = render(slot, &key);
        self.key = key;
        self.regenerations += 1;
        log::trace!("Regenerated {:?} digits '{}'", slot, self.key);
        true
    }
}

fn render(slot: DigitSlot, text: &str) -> Texture {
    let label = match slot {
        DigitSlot::Time => "digits/time",
        DigitSlot::Bpm => "digits/bpm",
        DigitSlot::Battery => "digits/battery",
    };
    Texture::from_rgba_image(label, &digit_texture(text), WrapMode::ClampToEdge)
        .with_filter(TextureFilter::Nearest)
}

/// One slot per readout, keyed by the formatted string it displays.
#[derive(Debug)]
pub struct DigitTextureCache {
    time: Entry,
    bpm: Entry,
    battery: Entry,
}

impl Default for DigitTextureCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitTextureCache {
    pub fn new() -> Self {
        Self {
            time: Entry::empty(DigitSlot::Time),
            bpm: Entry::empty(DigitSlot::Bpm),
            battery: Entry::empty(DigitSlot::Battery),
        }
    }

    fn entry(&self, slot: DigitSlot) -> &Entry {
        match slot {
            DigitSlot::Time => &self.time,
            DigitSlot::Bpm => &self.bpm,
            DigitSlot::Battery => &self.battery,
        }
    }

    fn entry_mut(&mut self, slot: DigitSlot) -> &mut Entry {
        match slot {
            DigitSlot::Time => &mut self.time,
            DigitSlot::Bpm => &mut self.bpm,
            DigitSlot::Battery => &mut self.battery,
        }
    }

    /// Updates one slot; returns whether it had to be re-rendered.
    pub fn refresh(&mut self, slot: DigitSlot, key: String) -> bool {
        self.entry_mut(slot).refresh(slot, key)
    }

    /// Brings every slot in line with the current readings.
    pub fn refresh_all(&mut self, state: &WatchState) {
        self.refresh(DigitSlot::Time, state.time_string());
        self.refresh(DigitSlot::Bpm, state.bpm_string());
        self.refresh(DigitSlot::Battery, state.battery_string());
    }

    pub fn texture(&self, slot: DigitSlot) -> &Texture {
        &self.entry(slot).texture
    }

    pub fn key(&self, slot: DigitSlot) -> &str {
        &self.entry(slot).key
    }

    pub fn regenerations(&self, slot: DigitSlot) -> u32 {
        self.entry(slot).regenerations
    }
}
