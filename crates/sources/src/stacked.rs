/// Combines `N` scalar sources into one source of `[f64; N]`.
///
/// Each pull takes one value from every source, in order. The stack ends as
/// soon as any source ends.
#[derive(Debug, Clone)]
pub struct Stacked<S, const N: usize> {
    sources: [S; N],
}

impl<S, const N: usize> Stacked<S, N>
where
    S: Iterator<Item = f64>,
{
    pub fn new(sources: [S; N]) -> Self {
        Self { sources }
    }
}

impl<S, const N: usize> Iterator for Stacked<S, N>
where
    S: Iterator<Item = f64>,
{
    type Item = [f64; N];

    fn next(&mut self) -> Option<[f64; N]> {
        let mut values = [0.0; N];
        for (value, source) in values.iter_mut().zip(&mut self.sources) {
            *value = source.next()?;
        }
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::GaussianNoise;

    #[test]
    fn pulls_one_value_from_each_source() {
        let mut stacked = Stacked::new([vec![1.0, 2.0].into_iter(), vec![3.0].into_iter()]);

        assert_eq!(stacked.next(), Some([1.0, 3.0]));
        assert_eq!(stacked.next(), None);
    }

    #[test]
    fn stacks_independent_noise() {
        let sources = [
            GaussianNoise::new(0.0, 1.0, 1).unwrap(),
            GaussianNoise::new(0.0, 1.0, 2).unwrap(),
        ];

        let [a, b] = Stacked::new(sources).next().unwrap();
        assert_ne!(a, b);
    }
}
