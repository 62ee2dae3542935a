use ipa_frames::{CompileOptions, Compiler, builtin_store};

fn main() {
    let text = std::env::args().nth(1).unwrap_or_else(|| "ˈmama ˌpaˈta".into());
    let compiler = Compiler::new(builtin_store());
    let frames = match compiler.compile(&text, &CompileOptions::default()) {
        Ok(frames) => frames,
        Err(error) => {
            println!("Error: {error}");
            std::process::exit(1);
        }
    };
    for warning in frames.warnings() {
        println!("Warning: {warning:?}");
    }
    let mut total = 0.0;
    for frame in frames {
        match &frame.params {
            Some(params) => println!(
                "{:>4} {:7.1}ms fade {:5.1}ms  f0 {:6.1} -> {:6.1}  F1 {:6.0} F2 {:6.0} F3 {:6.0}",
                frame.source.map_or(String::from("·"), String::from),
                frame.duration_ms,
                frame.fade_ms,
                params.f0,
                params.f0_end,
                params.f1_freq,
                params.f2_freq,
                params.f3_freq,
            ),
            None => println!("{:>4} {:7.1}ms (silence)", "-", frame.duration_ms),
        }
        total += frame.duration_ms;
    }
    println!("total: {total:.1}ms");
}
