//! # Level Export
//!
//! Writes a level back out as an image plus a description that [`Level::from_file`]
//! reads again.

use super::loader::image_from_grid;
use super::Level;
use crate::game::{EnemySpawn, Position};
use crate::TilecarveResult;
use log::info;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

fn push_position(out: &mut String, pos: Position) {
    let _ = write!(out, "\tx:{}\ty:{}", pos.x, pos.y);
}

fn push_enemy(out: &mut String, enemy: &EnemySpawn) {
    out.push_str("enemy");
    push_position(out, enemy.position);
    if let Some(name) = enemy.color.name() {
        let _ = write!(out, "\tcolor:{}", name);
    }
    let _ = write!(out, "\tview:{}", enemy.view_distance);
    if let Some(route) = &enemy.route {
        let nodes: Vec<String> = route
            .iter()
            .map(|node| match node.wait_ticks {
                0 => format!("{},{}", node.position.x, node.position.y),
                wait => format!("{},{},({})", node.position.x, node.position.y, wait),
            })
            .collect();
        let _ = write!(out, "\troute:{}", nodes.join(","));
    }
    out.push('\n');
}

impl Level {
    /// Renders the description file for this level, naming `image` as its tile image.
    ///
    /// Enemy colors outside the named palette are left out and come back random.
    pub fn describe(&self, image: &str) -> String {
        let mut out = String::new();
        out.push_str(image);
        out.push('\n');

        out.push_str("player");
        push_position(&mut out, self.placement.player);
        out.push('\n');

        out.push_str("objective");
        push_position(&mut out, self.placement.objective);
        out.push('\n');

        for enemy in &self.placement.enemies {
            push_enemy(&mut out, enemy);
        }
        out
    }

    /// Saves `<name>.png` and `<name>.txt` into `dir`, creating it if needed.
    ///
    /// Returns the path of the description file.
    pub fn save(&self, dir: impl AsRef<Path>, name: &str) -> TilecarveResult<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let image_name = format!("{}.png", name);
        image_from_grid(&self.grid).save(dir.join(&image_name))?;

        let path = dir.join(format!("{}.txt", name));
        std::fs::write(&path, self.describe(&image_name))?;
        info!("Saved level to {}", path.display());
        Ok(path)
    }
}
