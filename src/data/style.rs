//! Per-point opacity and marker size buffers driven by the selection.

use crate::data::selection::Selection;

/// Marker size used when the canvas reports no sizes at all.
pub const DEFAULT_MARKER_SIZE: f32 = 3.0;

/// Styling knobs read by [`StyleBuffers::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    /// Opacity of points outside a non-empty selection.
    pub alpha_other: f32,
    /// Size multiplier for selected points; `None` leaves sizes alone.
    pub expand_selected: Option<f32>,
}

/// Mutable style mirrors of the rendered collection.
///
/// Buffers handed over by a canvas may be shorter than the point set (often a
/// single shared entry). They are widened to full length on first use by
/// repeating their first entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleBuffers {
    num_points: usize,
    alphas: Vec<f32>,
    sizes: Vec<f32>,
    base_size: f32,
}

impl StyleBuffers {
    pub fn new(num_points: usize, alphas: Vec<f32>, sizes: Vec<f32>) -> Self {
        let base_size = sizes.first().copied().unwrap_or(DEFAULT_MARKER_SIZE);
        Self {
            num_points,
            alphas,
            sizes,
            base_size,
        }
    }

    pub fn alphas(&self) -> &[f32] {
        &self.alphas
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Size every point had before any selection was applied.
    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    fn widen(buf: &mut Vec<f32>, len: usize, fallback: f32) {
        if buf.len() < len {
            let fill = buf.first().copied().unwrap_or(fallback);
            buf.resize(len, fill);
        }
    }

    /// Rewrite the buffers so they reflect `selection`.
    pub fn apply(&mut self, selection: &Selection, params: &StyleParams) {
        Self::widen(&mut self.alphas, self.num_points, 1.0);

        if selection.is_empty() {
            self.alphas.iter_mut().for_each(|a| *a = 1.0);
        } else {
            self.alphas.iter_mut().for_each(|a| *a = params.alpha_other);
            for &i in selection.as_slice() {
                if let Some(a) = self.alphas.get_mut(i) {
                    *a = 1.0;
                }
            }
        }

        if let Some(factor) = params.expand_selected {
            Self::widen(&mut self.sizes, self.num_points, self.base_size);
            let base = self.base_size;
            self.sizes.iter_mut().for_each(|s| *s = base);
            for &i in selection.as_slice() {
                if let Some(s) = self.sizes.get_mut(i) {
                    *s = factor * base;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: StyleParams = StyleParams {
        alpha_other: 0.25,
        expand_selected: Some(3.0),
    };

    #[test]
    fn singleton_buffers_are_widened() {
        let mut s = StyleBuffers::new(4, vec![0.8], vec![2.0]);
        s.apply(&Selection::new(), &PARAMS);
        assert_eq!(s.alphas(), &[1.0; 4]);
        assert_eq!(s.sizes(), &[2.0; 4]);
    }

    #[test]
    fn empty_buffers_use_defaults() {
        let mut s = StyleBuffers::new(2, vec![], vec![]);
        s.apply(&Selection::from_indices([1]), &PARAMS);
        assert_eq!(s.alphas(), &[0.25, 1.0]);
        assert_eq!(s.sizes(), &[DEFAULT_MARKER_SIZE, 3.0 * DEFAULT_MARKER_SIZE]);
    }

    #[test]
    fn disabled_expansion_leaves_sizes_untouched() {
        let params = StyleParams {
            alpha_other: 0.5,
            expand_selected: None,
        };
        let mut s = StyleBuffers::new(3, vec![1.0], vec![7.0]);
        s.apply(&Selection::from_indices([0]), &params);
        assert_eq!(s.alphas(), &[1.0, 0.5, 0.5]);
        assert_eq!(s.sizes(), &[7.0]);
    }
}
