//! Network construction error types.

use super::properties::Field;

/// Errors raised while turning features into stations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The collection has no `features` list, or the list is empty
    #[error("data shape error: feature collection has no features")]
    DataShape,

    /// None of the synonym keys for a field held a usable value
    #[error("missing {field}: tried keys {}", .tried.join(", "))]
    MissingField {
        field: Field,
        tried: &'static [&'static str],
    },

    /// The feature geometry is absent or not a point
    #[error("feature geometry is not a point")]
    NotAPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NetworkError::DataShape;
        assert_eq!(
            err.to_string(),
            "data shape error: feature collection has no features"
        );

        let err = NetworkError::MissingField {
            field: Field::Name,
            tried: Field::Name.keys(),
        };
        assert_eq!(
            err.to_string(),
            "missing station name: tried keys name, station_name, stop_name, title"
        );

        let err = NetworkError::NotAPoint;
        assert_eq!(err.to_string(), "feature geometry is not a point");
    }
}
