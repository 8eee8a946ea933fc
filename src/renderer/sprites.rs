//! Sprite identities and readiness

/// Every image the games can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Axolotl,
    Cake,
    Pepper,
    Cone,
    Car,
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Axolotl,
        SpriteId::Cake,
        SpriteId::Pepper,
        SpriteId::Cone,
        SpriteId::Car,
    ];

    /// Asset URL, relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SpriteId::Axolotl => "/img/axolotl.png",
            SpriteId::Cake => "/img/cake.png",
            SpriteId::Pepper => "/img/pepper.png",
            SpriteId::Cone => "/img/cone.png",
            SpriteId::Car => "axolotlcar.png",
        }
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

/// Whether a sprite can be drawn this frame
pub trait SpriteSet {
    fn is_ready(&self, id: SpriteId) -> bool;
}

/// Fixed readiness, for headless runs and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteMask(u8);

impl SpriteMask {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        SpriteId::ALL.iter().fold(Self::none(), |m, id| m.with(*id))
    }

    pub fn with(self, id: SpriteId) -> Self {
        Self(self.0 | id.bit())
    }
}

impl SpriteSet for SpriteMask {
    fn is_ready(&self, id: SpriteId) -> bool {
        self.0 & id.bit() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        let mask = SpriteMask::none().with(SpriteId::Car);
        assert!(mask.is_ready(SpriteId::Car));
        assert!(!mask.is_ready(SpriteId::Cake));
        assert!(SpriteId::ALL.iter().all(|id| SpriteMask::all().is_ready(*id)));
    }
}
