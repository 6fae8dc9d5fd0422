use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};
use crate::grid::Kind;

/// Maps the characters of a map text to cell kinds, and names the character used to mark a route.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)] // a legend file only needs to list the symbols it changes
pub struct Legend {
    pub open: char,
    pub start: char,
    pub finish: char,
    pub blocked: char,
    pub path: char,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            open: '.',
            start: 'S',
            finish: 'X',
            blocked: 'B',
            path: '*',
        }
    }
}

impl Legend {
    /// Classify a single map character, `None` if it is not part of the legend
    pub fn kind_of(&self, symbol: char) -> Option<Kind> {
        match symbol {
            s if s == self.open => Some(Kind::Open),
            s if s == self.start => Some(Kind::Start),
            s if s == self.finish => Some(Kind::Finish),
            s if s == self.blocked => Some(Kind::Blocked),
            _ => None,
        }
    }

    pub fn symbol_of(&self, kind: Kind) -> char {
        match kind {
            Kind::Open => self.open,
            Kind::Start => self.start,
            Kind::Finish => self.finish,
            Kind::Blocked => self.blocked,
        }
    }

    /// Cell symbols must be distinct and printable on a single line.
    pub fn validate(&self) -> Result<()> {
        let symbols = [self.open, self.start, self.finish, self.blocked];

        for (i, a) in symbols.iter().enumerate() {
            if a.is_control() {
                return Err(RouteError::Legend(format!(
                    "control character {:?} cannot be a map symbol",
                    a
                )));
            }
            if symbols[i + 1..].contains(a) {
                return Err(RouteError::Legend(format!(
                    "symbol {:?} is used for more than one cell kind",
                    a
                )));
            }
        }

        if self.path.is_control() {
            return Err(RouteError::Legend(format!(
                "control character {:?} cannot mark a path",
                self.path
            )));
        }

        Ok(())
    }
}
