//! Recognized G-code commands and their motion parameters.

use super::tokenizer::CommandLine;

/// Comment prefix announcing the print role of the following moves
pub const TYPE_KEYWORD: &str = ";TYPE:";

/// Comment prefix marking the start of a layer
pub const LAYER_KEYWORD: &str = ";LAYER:";

/// `G` command decoded from its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GCommand {
    /// G0 / G1
    LinearMove,
    /// G28
    Home,
    /// G92
    SetPosition,
    /// Any other code, interpreted as a no-op
    Other(i64),
}

impl GCommand {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 | 1 => Self::LinearMove,
            28 => Self::Home,
            92 => Self::SetPosition,
            other => Self::Other(other),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// Optional axis parameters of a motion command
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveParams {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub e: Option<f64>,
}

impl MoveParams {
    pub fn from_line(line: &CommandLine<'_>) -> Self {
        Self {
            x: line.float("X"),
            y: line.float("Y"),
            z: line.float("Z"),
            e: line.float("E"),
        }
    }

    /// True if X or Y is negative, which means the file uses a centered origin
    pub fn has_negative_xy(&self) -> bool {
        self.x.is_some_and(|x| x < 0.0) || self.y.is_some_and(|y| y < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(GCommand::from_code(0), GCommand::LinearMove);
        assert_eq!(GCommand::from_code(1), GCommand::LinearMove);
        assert_eq!(GCommand::from_code(28), GCommand::Home);
        assert_eq!(GCommand::from_code(92), GCommand::SetPosition);
        assert_eq!(GCommand::from_code(2), GCommand::Other(2));
        assert!(!GCommand::from_code(4).is_recognized());
    }

    #[test]
    fn test_params_from_line() {
        let line = CommandLine::new("G1 X-1 Y2 E0.5 F1200");
        let params = MoveParams::from_line(&line);
        assert_eq!(params.x, Some(-1.0));
        assert_eq!(params.y, Some(2.0));
        assert_eq!(params.z, None);
        assert_eq!(params.e, Some(0.5));
        assert!(params.has_negative_xy());

        let params = MoveParams::from_line(&CommandLine::new("G1 Z-0.1"));
        assert!(!params.has_negative_xy());
    }
}
