use clap::Subcommand;
use foundation_core::{AnnotatedBrick, Config, PyramidLayout};

#[derive(Subcommand)]
pub enum LayoutAction {
    /// Draw the pyramid for a brick count
    Show {
        /// Number of bricks
        #[arg(allow_negative_numbers = true)]
        count: i64,
        /// Brick to mark as newly added
        #[arg(long)]
        new: Option<u32>,
        /// Print rows as JSON instead of a drawing
        #[arg(long)]
        json: bool,
    },
    /// Print the row and column of a single brick
    Place {
        /// Brick number (1-based)
        brick: u32,
    },
}

pub fn run(action: LayoutAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        LayoutAction::Show { count, new, json } => {
            let placements = PyramidLayout::try_compute(count)?;
            let highlight = Config::load_or_default().layout.highlight_interval;
            let rows = PyramidLayout::annotate(placements, new, highlight);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render(&rows));
            }
        }
        LayoutAction::Place { brick } => {
            if brick == 0 {
                return Err("bricks are numbered from 1".into());
            }
            let placement = PyramidLayout::place(brick);
            println!("{}", serde_json::to_string(&placement)?);
        }
    }
    Ok(())
}

const CELL_WIDTH: f64 = 4.0;

/// Draw rows top-down. Newest brick is `<n>`, highlighted bricks `(n)`.
pub fn render(rows: &[Vec<AnnotatedBrick>]) -> String {
    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for brick in row {
            let offset = (brick.placement.column * CELL_WIDTH).round() as usize;
            while line.len() < offset {
                line.push(' ');
            }
            let (open, close) = if brick.is_new {
                ('<', '>')
            } else if brick.is_highlight {
                ('(', ')')
            } else {
                ('[', ']')
            };
            line.push_str(&format!("{open}{:>2}{close}", brick.placement.brick));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
