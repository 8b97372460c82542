use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque, stable player identifier assigned by the fantasy service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Roster position. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    #[serde(alias = "DEF")]
    DST,
}

impl Position {
    pub const ALL: [Position; 6] =
        [Position::QB, Position::RB, Position::WR, Position::TE, Position::K, Position::DST];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A player as published by the fantasy service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Player name (e.g., "Josh Allen")
    pub name: String,

    /// Team abbreviation (e.g., "BUF")
    pub team: String,

    pub position: Position,

    /// Salary-cap price in millions. Absent or null prices read as zero.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "price_or_zero"
    )]
    pub price: Decimal,
}

fn price_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(rust_decimal::serde::float_option::deserialize(deserializer)?.unwrap_or(Decimal::ZERO))
}

impl Player {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        team: impl Into<String>,
        position: Position,
        price: Decimal,
    ) -> Self {
        Self { id: PlayerId(id), name: name.into(), team: team.into(), position, price }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_from_service_json() {
        let json = r#"{"id": 12, "name": "Josh Allen", "team": "BUF", "position": "QB", "price": 9.5}"#;
        let player: Player = serde_json::from_str(json).unwrap();

        assert_eq!(player.id, PlayerId(12));
        assert_eq!(player.position, Position::QB);
        assert_eq!(player.price, Decimal::new(95, 1));
    }

    #[test]
    fn test_missing_price_defaults_to_zero() {
        let json = r#"{"id": 3, "name": "Bills", "team": "BUF", "position": "DEF"}"#;
        let player: Player = serde_json::from_str(json).unwrap();

        assert_eq!(player.position, Position::DST);
        assert!(player.price.is_zero());
    }

    #[test]
    fn test_null_price_reads_as_zero() {
        let json = r#"{"id": 7, "name": "Travis Kelce", "team": "KC", "position": "TE", "price": null}"#;
        let player: Player = serde_json::from_str(json).unwrap();

        assert!(player.price.is_zero());
        assert_eq!(serde_json::to_value(&player).unwrap()["price"], 0.0);
    }

    #[test]
    fn test_position_display_order() {
        let mut positions = vec![Position::DST, Position::WR, Position::QB, Position::K];
        positions.sort();
        assert_eq!(positions, vec![Position::QB, Position::WR, Position::K, Position::DST]);
        assert_eq!(Position::DST.to_string(), "DST");
    }
}
