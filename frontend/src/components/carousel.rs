use std::rc::Rc;

use yew::prelude::*;

/// Position within a wrap-around list of `len` slides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Carousel {
    pub index: usize,
    pub len: usize,
}

pub enum CarouselAction {
    Next,
    Prev,
    Goto(usize),
    Resize(usize),
}

impl Reducible for Carousel {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if self.len == 0 {
            return match action {
                CarouselAction::Resize(len) => Rc::new(Self { index: 0, len }),
                _ => self,
            };
        }
        let index = match action {
            CarouselAction::Next => (self.index + 1) % self.len,
            CarouselAction::Prev => (self.index + self.len - 1) % self.len,
            CarouselAction::Goto(index) if index < self.len => index,
            CarouselAction::Goto(_) => self.index,
            CarouselAction::Resize(len) => {
                return Rc::new(Self {
                    index: if self.index < len { self.index } else { 0 },
                    len,
                })
            }
        };
        Rc::new(Self { index, len: self.len })
    }
}

impl Carousel {
    /// Indices of the `count` slides shown starting at the current one,
    /// wrapping past the end. Never repeats a slide when `len < count`.
    pub fn window(&self, count: usize) -> Vec<usize> {
        (0..count.min(self.len))
            .map(|offset| (self.index + offset) % self.len)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(state: Carousel, action: CarouselAction) -> Carousel {
        *Rc::new(state).reduce(action)
    }

    #[test]
    fn next_and_prev_wrap() {
        let state = Carousel { index: 2, len: 3 };
        assert_eq!(step(state, CarouselAction::Next).index, 0);
        let state = Carousel { index: 0, len: 3 };
        assert_eq!(step(state, CarouselAction::Prev).index, 2);
    }

    #[test]
    fn empty_carousel_ignores_navigation() {
        let empty = Carousel::default();
        assert_eq!(step(empty, CarouselAction::Next), empty);
        assert_eq!(step(empty, CarouselAction::Prev), empty);
        assert!(empty.window(3).is_empty());
    }

    #[test]
    fn goto_out_of_range_is_ignored() {
        let state = Carousel { index: 1, len: 3 };
        assert_eq!(step(state, CarouselAction::Goto(2)).index, 2);
        assert_eq!(step(state, CarouselAction::Goto(9)).index, 1);
    }

    #[test]
    fn shrinking_resets_a_dangling_index() {
        let state = Carousel { index: 4, len: 5 };
        assert_eq!(step(state, CarouselAction::Resize(2)), Carousel { index: 0, len: 2 });
        assert_eq!(step(state, CarouselAction::Resize(8)), Carousel { index: 4, len: 8 });
    }

    #[test]
    fn window_wraps_around() {
        let state = Carousel { index: 3, len: 4 };
        assert_eq!(state.window(3), vec![3, 0, 1]);
        let state = Carousel { index: 1, len: 2 };
        assert_eq!(state.window(3), vec![1, 0]);
    }
}
