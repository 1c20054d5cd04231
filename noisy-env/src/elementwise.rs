use burn::{
    prelude::Backend,
    tensor::{Tensor, TensorData},
};

/// An observation that can be perturbed element by element.
///
/// Values passed to `add_values` and `mul_values` are flat, row-major and
/// hold exactly `num_elements()` entries, and `mix` expects `previous` to
/// have the same shape as `self`. Implementations panic otherwise.
pub trait Elementwise: Clone {
    fn shape(&self) -> Vec<usize>;

    fn num_elements(&self) -> usize {
        self.shape().iter().product()
    }

    fn add_values(self, values: &[f64]) -> Self;

    fn mul_values(self, values: &[f64]) -> Self;

    /// `factor * self + (1 - factor) * previous`
    fn mix(self, previous: &Self, factor: f64) -> Self;
}

impl Elementwise for Vec<f64> {
    fn shape(&self) -> Vec<usize> {
        vec![self.len()]
    }

    fn add_values(mut self, values: &[f64]) -> Self {
        assert_eq!(self.len(), values.len(), "value count must match length");
        self.iter_mut().zip(values).for_each(|(x, v)| *x += v);
        self
    }

    fn mul_values(mut self, values: &[f64]) -> Self {
        assert_eq!(self.len(), values.len(), "value count must match length");
        self.iter_mut().zip(values).for_each(|(x, v)| *x *= v);
        self
    }

    fn mix(mut self, previous: &Self, factor: f64) -> Self {
        assert_eq!(self.len(), previous.len(), "cannot mix vectors of different lengths");
        self.iter_mut()
            .zip(previous)
            .for_each(|(x, p)| *x = factor * *x + (1.0 - factor) * p);
        self
    }
}

impl<const N: usize> Elementwise for [f64; N] {
    fn shape(&self) -> Vec<usize> {
        vec![N]
    }

    fn add_values(self, values: &[f64]) -> Self {
        std::array::from_fn(|i| self[i] + values[i])
    }

    fn mul_values(self, values: &[f64]) -> Self {
        std::array::from_fn(|i| self[i] * values[i])
    }

    fn mix(self, previous: &Self, factor: f64) -> Self {
        std::array::from_fn(|i| factor * self[i] + (1.0 - factor) * previous[i])
    }
}

impl<B: Backend, const D: usize> Elementwise for Tensor<B, D> {
    fn shape(&self) -> Vec<usize> {
        self.dims().to_vec()
    }

    fn add_values(self, values: &[f64]) -> Self {
        let other = tensor_like(&self, values);
        self + other
    }

    fn mul_values(self, values: &[f64]) -> Self {
        let other = tensor_like(&self, values);
        self * other
    }

    fn mix(self, previous: &Self, factor: f64) -> Self {
        self * factor + previous.clone() * (1.0 - factor)
    }
}

fn tensor_like<B: Backend, const D: usize>(tensor: &Tensor<B, D>, values: &[f64]) -> Tensor<B, D> {
    let data = TensorData::new(values.to_vec(), tensor.dims()).convert::<B::FloatElem>();
    Tensor::from_data(data, &tensor.device())
}
