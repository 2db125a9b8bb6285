//! The instruction wire format consumed by the store under test.
//!
//! One instruction per line, whitespace-separated fields, no escaping:
//!
//! ```text
//! PUT <address> <prefix_len> <priority> <name>
//! GET <address>
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Smallest valid prefix length for a PUT route.
pub const MIN_PREFIX_LEN: u8 = 1;
/// Largest valid prefix length for a PUT route.
pub const MAX_PREFIX_LEN: u8 = 32;
/// Largest valid route priority; the smallest is zero.
pub const MAX_PRIORITY: u8 = 10;

/// One workload operation destined for the store under test.
///
/// Instructions are immutable once produced; each is serialized to its
/// line format and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Insert a route for `address`.
    Put {
        /// Address the route applies to.
        address: String,
        /// Prefix length in `1..=32`.
        prefix_len: u8,
        /// Route priority in `0..=10`.
        priority: u8,
        /// Route name; non-empty, whitespace-free.
        name: String,
    },
    /// Look up the longest matching prefix for `address`.
    Get {
        /// Address to look up.
        address: String,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Put {
                address,
                prefix_len,
                priority,
                name,
            } => write!(f, "PUT {address} {prefix_len} {priority} {name}"),
            Instruction::Get { address } => write!(f, "GET {address}"),
        }
    }
}

/// Errors raised when parsing an instruction line.
#[derive(Debug, Error)]
pub enum ParseInstructionError {
    /// The line does not start with `PUT` or `GET`.
    #[error("unknown instruction type `{0}`")]
    UnknownType(String),

    /// The line has the wrong number of fields for its type.
    #[error("wrong number of fields for {0}")]
    FieldCount(&'static str),

    /// A numeric field failed to parse.
    #[error("invalid numeric field: {0}")]
    BadNumber(#[from] std::num::ParseIntError),

    /// The prefix length is outside of `1..=32`.
    #[error("prefix length {0} is outside 1..=32")]
    PrefixLenOutOfRange(u8),

    /// The priority is outside of `0..=10`.
    #[error("priority {0} is outside 0..=10")]
    PriorityOutOfRange(u8),
}

impl FromStr for Instruction {
    type Err = ParseInstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        match fields.first() {
            Some(&"PUT") => {
                let [_, address, prefix_len, priority, name] = fields[..] else {
                    return Err(ParseInstructionError::FieldCount("PUT"));
                };
                let prefix_len: u8 = prefix_len.parse()?;
                if !(MIN_PREFIX_LEN..=MAX_PREFIX_LEN).contains(&prefix_len) {
                    return Err(ParseInstructionError::PrefixLenOutOfRange(prefix_len));
                }
                let priority: u8 = priority.parse()?;
                if priority > MAX_PRIORITY {
                    return Err(ParseInstructionError::PriorityOutOfRange(priority));
                }
                Ok(Instruction::Put {
                    address: address.to_owned(),
                    prefix_len,
                    priority,
                    name: name.to_owned(),
                })
            }
            Some(&"GET") => {
                let [_, address] = fields[..] else {
                    return Err(ParseInstructionError::FieldCount("GET"));
                };
                Ok(Instruction::Get {
                    address: address.to_owned(),
                })
            }
            Some(other) => Err(ParseInstructionError::UnknownType((*other).to_owned())),
            None => Err(ParseInstructionError::UnknownType(String::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_the_wire_format() {
        let put = Instruction::Put {
            address: "10.0.0.1".to_owned(),
            prefix_len: 24,
            priority: 3,
            name: "CORE".to_owned(),
        };
        assert_eq!(put.to_string(), "PUT 10.0.0.1 24 3 CORE");

        let get = Instruction::Get {
            address: "10.0.0.1".to_owned(),
        };
        assert_eq!(get.to_string(), "GET 10.0.0.1");
    }

    #[test]
    fn round_trips_through_the_line_format() {
        let instructions = [
            Instruction::Put {
                address: "192.168.1.0".to_owned(),
                prefix_len: 1,
                priority: 0,
                name: "IP:1".to_owned(),
            },
            Instruction::Put {
                address: "10.0.0.2".to_owned(),
                prefix_len: 32,
                priority: 10,
                name: "Name".to_owned(),
            },
            Instruction::Get {
                address: "172.16.0.1".to_owned(),
            },
        ];

        for instruction in instructions {
            let line = instruction.to_string();
            let parsed: Instruction = line.parse().unwrap();
            assert_eq!(parsed, instruction);
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(matches!(
            "PUT 10.0.0.1 0 3 X".parse::<Instruction>(),
            Err(ParseInstructionError::PrefixLenOutOfRange(0))
        ));
        assert!(matches!(
            "PUT 10.0.0.1 33 3 X".parse::<Instruction>(),
            Err(ParseInstructionError::PrefixLenOutOfRange(33))
        ));
        assert!(matches!(
            "PUT 10.0.0.1 8 11 X".parse::<Instruction>(),
            Err(ParseInstructionError::PriorityOutOfRange(11))
        ));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            "DELETE 10.0.0.1".parse::<Instruction>(),
            Err(ParseInstructionError::UnknownType(_))
        ));
        assert!(matches!(
            "GET".parse::<Instruction>(),
            Err(ParseInstructionError::FieldCount("GET"))
        ));
        assert!(matches!(
            "PUT 10.0.0.1 8 3".parse::<Instruction>(),
            Err(ParseInstructionError::FieldCount("PUT"))
        ));
    }
}
