use flow_orrery::{flow, solar};

fn main() -> anyhow::Result<()> {
    flow::run(solar::flows())
}
