//! Ammunition display - последнее значение для HUD

use crate::weapon::collaborators::AmmoDisplay;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmmoCounter {
    pub bullets_left: u32,
    pub magazine_size: u32,
    /// Сколько раз обновлялся (для UI dirty-check)
    pub revision: u64,
}

impl AmmoCounter {
    /// HUD текст: "12 / 30"
    pub fn text(&self) -> String {
        format!("{} / {}", self.bullets_left, self.magazine_size)
    }

    pub fn is_empty(&self) -> bool {
        self.bullets_left == 0
    }
}

impl AmmoDisplay for AmmoCounter {
    fn show(&mut self, bullets_left: u32, magazine_size: u32) {
        self.bullets_left = bullets_left;
        self.magazine_size = magazine_size;
        self.revision += 1;
    }
}
