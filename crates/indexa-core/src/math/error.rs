// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error type shared by the fallible math operations.

use std::fmt;

/// Errors returned by matrix operations that can receive invalid input.
///
/// Every operation that takes a caller-controlled row index or an input that may
/// be singular reports failure through this type instead of producing
/// non-finite values or touching memory outside the matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// The upper-left 3x3 block has no usable inverse.
    SingularMatrix {
        /// The determinant that was computed for the 3x3 block.
        determinant: f32,
    },
    /// A row index outside `0..4` was passed to a row accessor.
    RowOutOfRange {
        /// The offending index.
        row: usize,
    },
    /// The parameters of a projection matrix describe no valid frustum.
    InvalidProjection {
        /// Which parameter was rejected.
        reason: &'static str,
    },
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::SingularMatrix { determinant } => {
                write!(f, "Matrix is not invertible (3x3 determinant {determinant})")
            }
            MathError::RowOutOfRange { row } => {
                write!(f, "Row index {row} is out of range, expected 0..4")
            }
            MathError::InvalidProjection { reason } => {
                write!(f, "Invalid projection parameters: {reason}")
            }
        }
    }
}

impl std::error::Error for MathError {}
