#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("scene_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fmt::Write as _;
    use std::fs;
    use std::path::Path;

    use polyviz_engine::complex::Arity;
    use polyviz_engine::parse::model_json;
    use polyviz_engine::scene::{DEFAULT_SHRINK_FACTOR, SceneData, SceneLayer};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r#"scene_cli (polyviz-engine)

USAGE:
  scene_cli info <model.json> <atoms.json> [options]
  scene_cli snapshot <model.json> <atoms.json> [options]

OPTIONS:
  --colors <path>    Include a color document
  --shrink <factor>  Tetrahedron shrink factor (default 0.3)
  --out <path>       Write output to a file instead of stdout
  --overwrite        Overwrite an existing output file
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "info" => cmd_scene(&mut args, Output::Info),
            "snapshot" => cmd_scene(&mut args, Output::Snapshot),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Output {
        Info,
        Snapshot,
    }

    fn cmd_scene(args: &mut Args, output: Output) -> Result<(), String> {
        let model_path = args.next().ok_or("missing <model.json>")?;
        let atoms_path = args.next().ok_or("missing <atoms.json>")?;

        let mut colors_path: Option<String> = None;
        let mut shrink = DEFAULT_SHRINK_FACTOR;
        let mut out_path: Option<String> = None;
        let mut overwrite = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--colors" => colors_path = Some(args.value("--colors")?),
                "--shrink" => {
                    shrink = args
                        .value("--shrink")?
                        .parse::<f64>()
                        .map_err(|e| format!("invalid --shrink value: {e}"))?;
                }
                "--out" => out_path = Some(args.value("--out")?),
                "--overwrite" => overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let scene = load_scene(&model_path, &atoms_path, colors_path.as_deref(), shrink)?;

        let text = match output {
            Output::Info => render_info(&scene),
            Output::Snapshot => render_snapshot(&scene),
        };

        if let Some(path) = out_path.as_deref() {
            write_text_file(Path::new(path), &text, overwrite)?;
            eprintln!("wrote {path}");
        } else {
            print!("{text}");
        }

        Ok(())
    }

    fn load_scene(
        model_path: &str,
        atoms_path: &str,
        colors_path: Option<&str>,
        shrink: f64,
    ) -> Result<SceneData, String> {
        let model_input =
            fs::read_to_string(model_path).map_err(|e| format!("read {model_path}: {e}"))?;
        let atoms_input =
            fs::read_to_string(atoms_path).map_err(|e| format!("read {atoms_path}: {e}"))?;

        let complex = model_json::parse_model_str(&model_input).map_err(|e| e.to_string())?;
        let valuations =
            model_json::parse_valuations_str(&atoms_input).map_err(|e| e.to_string())?;

        let colors = match colors_path {
            Some(path) => {
                let input = fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
                Some(model_json::parse_colors_str(&input).map_err(|e| e.to_string())?)
            }
            None => None,
        };

        SceneData::load(complex, valuations, colors, shrink).map_err(|e| e.to_string())
    }

    fn render_info(scene: &SceneData) -> String {
        let mut out = String::new();

        let complex = scene.complex();
        let _ = writeln!(out, "points {}", complex.points().len());
        let _ = writeln!(out, "simplices {}", complex.simplex_count());
        for arity in Arity::ALL {
            let _ = writeln!(out, "simplices.{arity:?} {}", complex.count_of(arity));
        }
        let _ = writeln!(out, "shrink_factor {}", scene.shrink_factor());

        for (atom, layer) in scene.properties() {
            let set = &layer.set;
            let _ = writeln!(
                out,
                "property {atom} yay points={} edges={} triangles={} tetrahedrons={}",
                set.points.satisfying_count,
                set.edges.satisfying_count,
                set.triangles.satisfying_count,
                set.tetrahedra.satisfying_count,
            );
        }

        out
    }

    fn render_snapshot(scene: &SceneData) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# polyviz-engine golden v1");
        let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
        let _ = write!(out, "shrink_factor ");
        write_f64(&mut out, scene.shrink_factor());
        out.push('\n');

        write_layer(&mut out, "base", scene.base());
        for (atom, layer) in scene.properties() {
            write_layer(&mut out, atom, layer);
        }

        normalize_snapshot_text(&out)
    }

    fn write_layer(out: &mut String, name: &str, layer: &SceneLayer) {
        let _ = writeln!(out, "layer {name}");
        for arity in Arity::ALL {
            let buffer = layer.set.buffer(arity);
            let _ = writeln!(
                out,
                "{arity:?}.simplices {} yay {}",
                buffer.colors.len(),
                buffer.satisfying_count
            );
            for position in buffer.positions.iter().copied() {
                write_vec3_line(out, "p", position);
            }
            for color in buffer.colors.iter().copied() {
                let _ = writeln!(out, "c {color:#08x}");
            }
        }
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text))
            .map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let value = if value == -0.0 { 0.0 } else { value };
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        if q == -0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
        let _ = write!(out, "{prefix} ");
        write_f64(out, v[0]);
        out.push(' ');
        write_f64(out, v[1]);
        out.push(' ');
        write_f64(out, v[2]);
        out.push('\n');
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
