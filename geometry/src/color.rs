use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// A linear RGBA color, all channels in 0..1.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb_u32_const(0xFC6255);
    pub const GREEN: Self = Self::rgb_u32_const(0x83C167);
    pub const BLUE: Self = Self::rgb_u32_const(0x58C4DD);
    pub const YELLOW: Self = Self::rgb_u32_const(0xFFFF00);

    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn rgb_u32(rgb: u32) -> Self {
        Self::rgb_u32_const(rgb)
    }

    const fn rgb_u32_const(rgb: u32) -> Self {
        let r = ((rgb & 0xff0000) >> 16) as f32 / 255.0;
        let g = ((rgb & 0xff00) >> 8) as f32 / 255.0;
        let b = (rgb & 0xff) as f32 / 255.0;
        Color::rgb(r, g, b)
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.red + rhs.red,
            self.green + rhs.green,
            self.blue + rhs.blue,
            self.alpha + rhs.alpha,
        )
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(
            self.red * rhs,
            self.green * rhs,
            self.blue * rhs,
            self.alpha * rhs,
        )
    }
}
