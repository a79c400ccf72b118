// src/models/probability.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct PlayerInput {
    #[validate(range(exclusive_min = 0.0, message = "Player level must be greater than zero."))]
    #[schema(example = 3.5)]
    pub level: f64,

    #[validate(range(exclusive_min = 0.0, message = "Player reliability must be greater than zero."))]
    #[schema(example = 82.0)]
    pub reliability: f64,
}

// Dois casais: jogadores 1 e 2 contra 3 e 4
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProbabilityRequest {
    #[validate(
        length(equal = 4, message = "Exactly four players are required."),
        nested
    )]
    pub players: Vec<PlayerInput>,
}

impl ProbabilityRequest {
    /// Corpo esperado pelo serviço: `player1_level`, `player1_reliability`, ...
    pub fn to_upstream_body(&self) -> Value {
        let mut body = Map::new();

        for (index, player) in self.players.iter().enumerate() {
            let n = index + 1;
            body.insert(format!("player{}_level", n), number(player.level));
            body.insert(format!("player{}_reliability", n), number(player.reliability));
        }

        Value::Object(body)
    }
}

// NaN/infinito não chegam aqui (a validação exige > 0), mas JSON não os aceita
fn number(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(level: f64, reliability: f64) -> PlayerInput {
        PlayerInput { level, reliability }
    }

    fn request(players: Vec<PlayerInput>) -> ProbabilityRequest {
        ProbabilityRequest { players }
    }

    #[test]
    fn upstream_body_is_flattened_by_player_number() {
        let body = request(vec![
            player(3.5, 80.0),
            player(4.0, 65.5),
            player(2.75, 90.0),
            player(5.0, 100.0),
        ])
        .to_upstream_body();

        assert_eq!(
            body,
            json!({
                "player1_level": 3.5, "player1_reliability": 80.0,
                "player2_level": 4.0, "player2_reliability": 65.5,
                "player3_level": 2.75, "player3_reliability": 90.0,
                "player4_level": 5.0, "player4_reliability": 100.0,
            })
        );
    }

    #[test]
    fn four_positive_players_are_valid() {
        let req = request(vec![player(1.0, 1.0); 4]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn wrong_player_count_is_invalid() {
        assert!(request(vec![player(1.0, 1.0); 3]).validate().is_err());
        assert!(request(vec![player(1.0, 1.0); 5]).validate().is_err());
        assert!(request(vec![]).validate().is_err());
    }

    #[test]
    fn zero_level_or_reliability_is_invalid() {
        let mut players = vec![player(1.0, 1.0); 4];
        players[2] = player(0.0, 50.0);
        assert!(request(players).validate().is_err());

        let mut players = vec![player(1.0, 1.0); 4];
        players[0] = player(3.0, 0.0);
        assert!(request(players).validate().is_err());

        let mut players = vec![player(1.0, 1.0); 4];
        players[1] = player(-2.0, 10.0);
        assert!(request(players).validate().is_err());
    }

    #[test]
    fn deserializes_from_form_json() {
        let req: ProbabilityRequest = serde_json::from_value(json!({
            "players": [
                { "level": 3.5, "reliability": 80 },
                { "level": 4, "reliability": 65.5 },
                { "level": 2.75, "reliability": 90 },
                { "level": 5, "reliability": 100 }
            ]
        }))
        .unwrap();

        assert_eq!(req.players.len(), 4);
        assert_eq!(req.players[1].level, 4.0);
    }
}
