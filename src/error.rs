// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Errors raised while reading geometry or configuring a projection.
///
/// Numerical degeneracies inside the streaming pipeline are never errors;
/// they resolve to the nearest sensible output instead.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    MalformedJson,
    PropertiesExpectedObjectOrNull,
    ExpectedStringValue,
    ExpectedProperty(String),
    ExpectedF64Value,
    ExpectedArrayValue,
    ExpectedObjectValue,

    /// The raw projection has no inverse.
    InvertUnsupported,
    /// The planar point lies outside the domain of the inverse.
    InvertOutOfDomain([f64; 2]),
    /// The projection does not support this setter (e.g. rotating the
    /// planar identity projection).
    Unsupported {
        projection: String,
        operation: String,
    },
    /// Precision must be finite and non-negative.
    InvalidPrecision(f64),
    /// Digits must be finite and non-negative.
    InvalidDigits(f64),
}

impl Error {
    pub(crate) fn unsupported(projection: &str, operation: &str) -> Self {
        Error::Unsupported {
            projection: projection.to_owned(),
            operation: operation.to_owned(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::MalformedJson => write!(f, "Encountered malformed JSON."),
            Error::PropertiesExpectedObjectOrNull => write!(
                f,
                "Encountered neither object type nor null type for \
                 'properties' object."
            ),
            Error::ExpectedStringValue => write!(f, "Expected a string value."),
            Error::ExpectedProperty(ref prop_name) => {
                write!(f, "Expected GeoJSON property '{}'.", prop_name)
            }
            Error::ExpectedF64Value => write!(f, "Expected a floating-point value."),
            Error::ExpectedArrayValue => write!(f, "Expected an array."),
            Error::ExpectedObjectValue => write!(f, "Expected an object."),
            Error::InvertUnsupported => {
                write!(f, "The raw projection does not provide an inverse.")
            }
            Error::InvertOutOfDomain([x, y]) => {
                write!(f, "The point [{}, {}] has no inverse.", x, y)
            }
            Error::Unsupported {
                ref projection,
                ref operation,
            } => write!(
                f,
                "Operation '{}' is not supported by the {} projection.",
                operation, projection
            ),
            Error::InvalidPrecision(p) => {
                write!(f, "Invalid precision {}: expected a finite, non-negative number.", p)
            }
            Error::InvalidDigits(d) => {
                write!(f, "Invalid digits {}: expected a finite, non-negative number.", d)
            }
        }
    }
}

impl std::error::Error for Error {}
