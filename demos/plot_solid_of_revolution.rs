use RustedRevolve::Utils::plots::render_all;
use RustedRevolve::Utils::task_config::RevolutionTask;
use RustedRevolve::revolution::calculate;

fn main() {
    // same as `cargo run -- demos/disk_task.toml`
    let task = RevolutionTask::from_toml(include_str!("disk_task.toml")).unwrap();
    let calculation = calculate(&task).unwrap();
    println!("{}", calculation.message());
    println!("{}", calculation.summary_table());
    for path in render_all(&calculation, &task).unwrap() {
        println!("written: {}", path.display());
    }
}
