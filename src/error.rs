use std::path::PathBuf;

/// Errors that can occur when building a board.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must be at least {min}x{min}, got {width}x{height}")]
    TooSmall { width: i32, height: i32, min: i32 },

    #[error("board must be at most {max}x{max}, got {width}x{height}")]
    TooLarge { width: i32, height: i32, max: i32 },
}

/// A bounded sequence refused to grow past its capacity.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("capacity of {capacity} reached")]
pub struct CapacityError {
    pub capacity: usize,
}

/// Errors that can occur while reading or writing the score file.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("failed to read scores from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write scores to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that end the game shell.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::TooSmall {
            width: 2,
            height: 20,
            min: 3,
        };
        assert_eq!(err.to_string(), "board must be at least 3x3, got 2x20");
    }

    #[test]
    fn test_capacity_error_display() {
        let err = CapacityError { capacity: 100 };
        assert_eq!(err.to_string(), "capacity of 100 reached");
    }

    #[test]
    fn test_score_error_display() {
        let err = ScoreError::Write {
            path: PathBuf::from("scores.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write scores to scores.txt: denied");
    }
}
