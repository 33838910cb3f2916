use rand::Rng;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Star {
    pub x_px: u32,
    pub y_px: u32,
    /// HSL lightness, 20..100.
    pub lightness: u32,
}

impl Star {
    fn to_shadow(self) -> String {
        format!(
            "{}px {}px hsl(0deg, 0%, {}%)",
            self.x_px, self.y_px, self.lightness
        )
    }
}

/// One layer of randomly placed background stars, drawn as CSS box shadows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    pub fn generate<R: Rng + ?Sized>(count: usize, viewport: Viewport, rng: &mut R) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x_px: random_below(rng, viewport.width),
                y_px: random_below(rng, viewport.height),
                lightness: 20 + rng.gen_range(0..80),
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Value for the CSS `box-shadow` property.
    pub fn box_shadow(&self) -> String {
        self.stars
            .iter()
            .map(|s| s.to_shadow())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 { 0 } else { rng.gen_range(0..bound) }
}
