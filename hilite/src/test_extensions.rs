use spectral::{assert_that, Spec};
use spectral::prelude::*;

/// Assertions descending into the elements of a vector subject.
pub trait ElementAssertions<'s, T> {
    /// Asserts the vector holds exactly one element and descends into it.
    fn has_only_element(&mut self) -> Spec<'s, T>;

    /// Descends into the element at `index`.
    fn item_at(&mut self, index: usize) -> Spec<'s, T>;
}

impl<'s, T> ElementAssertions<'s, T> for Spec<'s, Vec<T>> {
    fn has_only_element(&mut self) -> Spec<'s, T> {
        assert_that(self.subject).has_length(1);
        self.item_at(0)
    }

    fn item_at(&mut self, index: usize) -> Spec<'s, T> {
        match self.subject.get(index) {
            Some(element) => assert_that(element),
            None => panic!(
                "no element at index {} in a vector of length {}",
                index,
                self.subject.len()
            ),
        }
    }
}
