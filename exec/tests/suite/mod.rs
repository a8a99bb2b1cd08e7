// Aggregates all integration tests as modules.
mod replay_cli;
