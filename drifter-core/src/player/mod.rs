pub mod player_inputs;
