/// Displayed and natural size of the image currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
    pub natural_width: u32,
    pub natural_height: u32,
}

impl ImageDimensions {
    /// Horizontal and vertical factors mapping natural pixels to displayed ones.
    pub fn scale(&self) -> Option<(f64, f64)> {
        if self.natural_width == 0 || self.natural_height == 0 {
            return None;
        }
        Some((
            self.width / self.natural_width as f64,
            self.height / self.natural_height as f64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_displayed_over_natural() {
        let dims = ImageDimensions {
            width: 400.0,
            height: 300.0,
            natural_width: 1600,
            natural_height: 1200,
        };
        assert_eq!(dims.scale(), Some((0.25, 0.25)));
    }

    #[test]
    fn zero_natural_size_has_no_scale() {
        let dims = ImageDimensions {
            width: 400.0,
            height: 300.0,
            natural_width: 0,
            natural_height: 1200,
        };
        assert_eq!(dims.scale(), None);
    }
}
