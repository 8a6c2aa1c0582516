//! Target types of `CAST` expressions.

use core::fmt;

/// SQL data types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// Small integer.
    Smallint,
    /// Integer.
    Integer,
    /// Big integer.
    Bigint,
    /// Real.
    Real,
    /// Double precision.
    Double,
    /// Decimal with optional precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after the decimal point.
        scale: Option<u16>,
    },
    /// Numeric with optional precision and scale.
    Numeric {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after the decimal point.
        scale: Option<u16>,
    },
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Text.
    Text,
    /// Date.
    Date,
    /// Time.
    Time,
    /// Timestamp.
    Timestamp,
    /// Date and time.
    Datetime,
    /// Boolean.
    Boolean,
    /// Dialect type such as ABAP `NUMC`, with its length arguments.
    Custom {
        /// Type name as written.
        name: String,
        /// Length, precision or scale arguments.
        args: Vec<u32>,
    },
}

fn write_precision(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    precision: Option<u16>,
    scale: Option<u16>,
) -> fmt::Result {
    match (precision, scale) {
        (Some(p), Some(s)) => write!(f, "{name}({p}, {s})"),
        (Some(p), None) => write!(f, "{name}({p})"),
        _ => f.write_str(name),
    }
}

fn write_length(f: &mut fmt::Formatter<'_>, name: &str, len: Option<u32>) -> fmt::Result {
    match len {
        Some(n) => write!(f, "{name}({n})"),
        None => f.write_str(name),
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smallint => f.write_str("SMALLINT"),
            Self::Integer => f.write_str("INTEGER"),
            Self::Bigint => f.write_str("BIGINT"),
            Self::Real => f.write_str("REAL"),
            Self::Double => f.write_str("DOUBLE"),
            Self::Decimal { precision, scale } => write_precision(f, "DECIMAL", *precision, *scale),
            Self::Numeric { precision, scale } => write_precision(f, "NUMERIC", *precision, *scale),
            Self::Char(len) => write_length(f, "CHAR", *len),
            Self::Varchar(len) => write_length(f, "VARCHAR", *len),
            Self::Text => f.write_str("TEXT"),
            Self::Date => f.write_str("DATE"),
            Self::Time => f.write_str("TIME"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Datetime => f.write_str("DATETIME"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Custom { name, args } if args.is_empty() => f.write_str(name),
            Self::Custom { name, args } => {
                let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                write!(f, "{name}({})", args.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_display() {
        assert_eq!(DataType::Integer.to_string(), "INTEGER");
        assert_eq!(DataType::Varchar(Some(255)).to_string(), "VARCHAR(255)");
        assert_eq!(
            DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
            .to_string(),
            "DECIMAL(10, 2)"
        );
    }

    #[test]
    fn test_custom_type_display() {
        let numc = DataType::Custom {
            name: String::from("NUMC"),
            args: vec![10],
        };
        assert_eq!(numc.to_string(), "NUMC(10)");
        let dats = DataType::Custom {
            name: String::from("DATS"),
            args: vec![],
        };
        assert_eq!(dats.to_string(), "DATS");
    }
}
