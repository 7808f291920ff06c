//! Cartesian product of resolved parameter values.

use std::fmt;
use std::iter;

use itertools::structs::MultiProduct;
use itertools::Itertools;

use crate::parameter::Parameter;
use crate::resolver::{resolve_values, ValueSequence};
use crate::value::Value;
use crate::CombinatorialError;

enum Product {
    // A test with no parameters still runs once.
    Unit(iter::Once<Vec<Value>>),
    Multi(MultiProduct<ValueSequence>),
}

/// Every combination of candidate values for a list of parameters.
///
/// Combinations are produced lazily with the last parameter varying fastest.
/// Each combination holds one value per parameter, in parameter order.
///
/// # Examples
///
/// ```rust
/// use combinatorial::{Combinations, Parameter, ParamType, Value};
/// let params = [
///     Parameter::new("a", ParamType::Bool),
///     Parameter::new("b", ParamType::String).with_values(["x", "y"]),
/// ];
/// let all: Vec<Vec<Value>> = Combinations::new(&params).unwrap().collect();
/// assert_eq!(all.len(), 4);
/// assert_eq!(all[1], [Value::Bool(true), Value::from("y")]);
/// ```
pub struct Combinations {
    names: Vec<String>,
    product: Product,
}

impl Combinations {
    /// Resolves every parameter up front; the first resolution error is returned.
    pub fn new(parameters: &[Parameter]) -> Result<Self, CombinatorialError> {
        let names = parameters.iter().map(|p| p.name().to_string()).collect();
        if parameters.is_empty() {
            return Ok(Self {
                names,
                product: Product::Unit(iter::once(Vec::new())),
            });
        }

        let sequences = parameters
            .iter()
            .map(resolve_values)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(parameters = parameters.len(), "resolved all parameters");

        Ok(Self {
            names,
            product: Product::Multi(sequences.into_iter().multi_cartesian_product()),
        })
    }

    /// Parameter names, in the same order as the values of each combination.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Iterator for Combinations {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Vec<Value>> {
        match &mut self.product {
            Product::Unit(once) => once.next(),
            Product::Multi(product) => product.next(),
        }
    }
}

impl fmt::Debug for Combinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combinations").field("names", &self.names).finish_non_exhaustive()
    }
}
