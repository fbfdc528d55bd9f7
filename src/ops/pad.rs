use std::iter::FusedIterator;

/// Supplies the element placed at `index` once the source runs short.
pub trait Padding<T> {
    fn fill(&mut self, index: usize) -> T;
}

/// Pads with `T::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFill;

impl<T: Default> Padding<T> for DefaultFill {
    fn fill(&mut self, _index: usize) -> T {
        T::default()
    }
}

/// Pads with clones of a fixed value.
#[derive(Debug, Clone)]
pub struct Filler<T>(pub(crate) T);

impl<T: Clone> Padding<T> for Filler<T> {
    fn fill(&mut self, _index: usize) -> T {
        self.0.clone()
    }
}

/// Pads with the result of a function of the output position.
#[derive(Debug, Clone)]
pub struct FillWith<F>(pub(crate) F);

impl<T, F: FnMut(usize) -> T> Padding<T> for FillWith<F> {
    fn fill(&mut self, index: usize) -> T {
        (self.0)(index)
    }
}

/// Yields the source, then padding until at least `width` elements were
/// produced. A source already `width` long or longer passes through as is.
#[derive(Debug, Clone)]
pub struct Pad<I, P> {
    iter: Option<I>,
    width: usize,
    produced: usize,
    padding: P,
}

impl<I, P> Pad<I, P> {
    pub(crate) fn new(iter: I, width: usize, padding: P) -> Self {
        Pad {
            iter: Some(iter),
            width,
            produced: 0,
            padding,
        }
    }
}

impl<I, P> Iterator for Pad<I, P>
where
    I: Iterator,
    P: Padding<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(iter) = self.iter.as_mut() {
            match iter.next() {
                Some(item) => {
                    self.produced += 1;
                    return Some(item);
                }
                None => self.iter = None,
            }
        }

        if self.produced < self.width {
            let item = self.padding.fill(self.produced);
            self.produced += 1;
            return Some(item);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let shortfall = self.width.saturating_sub(self.produced);
        match &self.iter {
            Some(iter) => {
                let (lower, upper) = iter.size_hint();
                (
                    lower.max(shortfall),
                    upper.map(|upper| upper.max(shortfall)),
                )
            }
            None => (shortfall, Some(shortfall)),
        }
    }
}

impl<I, P> FusedIterator for Pad<I, P>
where
    I: Iterator,
    P: Padding<I::Item>,
{
}

#[cfg(test)]
mod tests {
    use super::super::LagExt;

    #[test]
    fn wide_source_passes_through() {
        let result: Vec<i32> = vec![123, 456, 789].pad(2).collect();
        assert_eq!(result, vec![123, 456, 789]);
    }

    #[test]
    fn equal_source_passes_through() {
        let result: Vec<i32> = vec![123, 456, 789].pad(3).collect();
        assert_eq!(result, vec![123, 456, 789]);
    }

    #[test]
    fn narrow_source_gets_default_padding() {
        let result: Vec<i32> = vec![123, 456, 789].pad(5).collect();
        assert_eq!(result, vec![123, 456, 789, 0, 0]);
    }

    #[test]
    fn narrow_source_gets_filler() {
        let result: Vec<i32> = vec![123, 456, 789].pad_with(5, -1).collect();
        assert_eq!(result, vec![123, 456, 789, -1, -1]);
    }

    #[test]
    fn dynamic_padding_sees_output_position() {
        let result: String = "hello"
            .chars()
            .pad_using(15, |i| if i % 2 == 0 { '+' } else { '-' })
            .collect();
        assert_eq!(result, "hello-+-+-+-+-+");
    }

    #[test]
    fn optional_elements_pad_with_none() {
        let result: Vec<Option<&str>> = vec![Some("foo"), Some("bar"), Some("baz")]
            .pad(5)
            .collect();
        assert_eq!(result, vec![Some("foo"), Some("bar"), Some("baz"), None, None]);
    }

    #[test]
    fn size_hint_accounts_for_padding() {
        let padded = vec![1, 2].pad(4);
        assert_eq!(padded.size_hint(), (4, Some(4)));
    }
}
