use thiserror::Error;

/// Errors detected while compiling a rerun program.
///
/// Indices are 0-based; messages show the 1-based position of the token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Token is neither an opcode name nor a digit-only literal
    #[error("Rerun instruction #{} \"{text}\" is invalid.", .index + 1)]
    InvalidToken { index: usize, text: String },

    /// Binary instruction with fewer than two values on the stack
    #[error(
        "Rerun instruction #{} \"{token}\" requires two values on stack but {}",
        .index + 1,
        describe_available(.available)
    )]
    StackUnderflow {
        index: usize,
        token: String,
        available: usize,
    },

    /// Program ended with a depth other than one
    #[error("Rerun code leaves {final_depth} value(s) on stack instead of just one.")]
    StackImbalance { final_depth: usize },
}

fn describe_available(available: &usize) -> &'static str {
    match *available {
        0 => "there are none.",
        _ => "there is only one.",
    }
}

impl CompileError {
    /// 1-based position of the offending token, if the error has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            CompileError::InvalidToken { index, .. } | CompileError::StackUnderflow { index, .. } => {
                Some(index + 1)
            }
            CompileError::StackImbalance { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_token_display() {
        let err = CompileError::InvalidToken {
            index: 1,
            text: "xyz".to_string(),
        };
        assert_eq!(err.to_string(), "Rerun instruction #2 \"xyz\" is invalid.");
    }

    #[test]
    fn test_underflow_none_display() {
        let err = CompileError::StackUnderflow {
            index: 0,
            token: "add".to_string(),
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "Rerun instruction #1 \"add\" requires two values on stack but there are none."
        );
    }

    #[test]
    fn test_underflow_one_display() {
        let err = CompileError::StackUnderflow {
            index: 1,
            token: "cpow".to_string(),
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "Rerun instruction #2 \"cpow\" requires two values on stack but there is only one."
        );
    }

    #[test]
    fn test_imbalance_display() {
        let err = CompileError::StackImbalance { final_depth: 2 };
        assert_eq!(
            err.to_string(),
            "Rerun code leaves 2 value(s) on stack instead of just one."
        );
    }

    #[test]
    fn test_position() {
        let err = CompileError::InvalidToken {
            index: 4,
            text: "?".to_string(),
        };
        assert_eq!(err.position(), Some(5));
        assert_eq!(CompileError::StackImbalance { final_depth: 0 }.position(), None);
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = CompileError::StackImbalance { final_depth: 0 };
        let _: &dyn std::error::Error = &err;
    }
}
