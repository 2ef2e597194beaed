fn main() {
    if let Err(err) = bar_chart_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
