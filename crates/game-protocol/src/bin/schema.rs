use flappy_game_protocol::profile::LaunchProfile;
use schemars::schema_for;

pub fn main() {
    let schema = schema_for!(LaunchProfile);
    println!(
        "{}",
        serde_json::to_string_pretty(&schema).expect("failed to generate schema JSON")
    );
}
