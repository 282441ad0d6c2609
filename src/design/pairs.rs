//! MLCM paired-comparison design for the White's illusion experiment.

use rand::Rng;
use tracing::debug;

use crate::config::WhitesConfig;
use crate::core::combinations::{Atom, PairingMode, atom_pairs, cross};
use crate::core::levels::{format_context, format_level};
use crate::core::naming::{WhiteName, strip_prefix, with_prefix};
use crate::design::table::TableRow;
use crate::design::{Block, Orientation};

/// One pairwise trial; index 0 is the left target.
#[derive(Clone, Debug, PartialEq)]
pub struct PairTrial {
    pub lum: [f64; 2],
    pub context: [u8; 2],
    pub image: String,
}

impl PairTrial {
    pub fn name(&self) -> WhiteName {
        WhiteName {
            lum_left: self.lum[0],
            lum_right: self.lum[1],
            context_left: self.context[0],
            context_right: self.context[1],
        }
    }
}

fn parse_context(s: &str) -> Result<u8, String> {
    match s {
        "0.0" | "0" => Ok(0),
        "1.0" | "1" => Ok(1),
        _ => Err(format!("bad context {s:?}")),
    }
}

impl TableRow for PairTrial {
    type Image = WhiteName;

    const COLUMNS: &'static [&'static str] = &["lum1", "lum2", "c1", "c2", "im"];

    fn cells(&self) -> Vec<String> {
        vec![
            format_level(self.lum[0]),
            format_level(self.lum[1]),
            format_context(self.context[0]),
            format_context(self.context[1]),
            self.image.clone(),
        ]
    }

    fn from_cells(cells: &[&str]) -> Result<Self, String> {
        let &[l1, l2, c1, c2, im] = cells else {
            return Err(format!("expected 5 data cells, got {}", cells.len()));
        };
        let lum = |s: &str| {
            s.parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .ok_or_else(|| format!("bad luminance {s:?}"))
        };
        Ok(Self {
            lum: [lum(l1)?, lum(l2)?],
            context: [parse_context(c1)?, parse_context(c2)?],
            image: im.to_string(),
        })
    }

    fn image_refs(&self) -> Vec<&str> {
        vec![self.image.as_str()]
    }
}

#[derive(Clone, Debug)]
pub struct PairDesign {
    atoms: Vec<Atom>,
    mode: PairingMode,
    image_prefix: String,
}

impl PairDesign {
    pub fn new(
        luminances: &[f64],
        contexts: &[u8],
        mode: PairingMode,
        image_prefix: impl Into<String>,
    ) -> Self {
        Self {
            atoms: cross(luminances, contexts),
            mode,
            image_prefix: image_prefix.into(),
        }
    }

    pub fn from_config(cfg: &WhitesConfig) -> Self {
        Self::new(
            &cfg.luminances(),
            &cfg.contexts,
            cfg.pairing_mode(),
            cfg.image_prefix.clone(),
        )
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn mode(&self) -> PairingMode {
        self.mode
    }

    pub fn image_prefix(&self) -> &str {
        &self.image_prefix
    }

    pub fn units(&self) -> Vec<[Atom; 2]> {
        atom_pairs(&self.atoms, self.mode)
    }

    /// Assign the pair to left/right by coin flip.
    pub fn trial<R: Rng + ?Sized>(&self, unit: [Atom; 2], rng: &mut R) -> PairTrial {
        let [left, right] = Orientation::draw(rng).apply(unit);
        let mut trial = PairTrial {
            lum: [left.level, right.level],
            context: [left.context, right.context],
            image: String::new(),
        };
        trial.image = with_prefix(&self.image_prefix, &trial.name());
        trial
    }

    pub fn block<R: Rng + ?Sized>(&self, index: u32, rng: &mut R) -> Block<PairTrial> {
        let rows: Vec<PairTrial> = self
            .units()
            .into_iter()
            .map(|unit| self.trial(unit, rng))
            .collect();
        debug!(block = index, trials = rows.len(), mode = ?self.mode, "assembled pair block");
        Block::assemble(index, rows, rng)
    }

    pub fn decode_image(&self, trial: &PairTrial) -> Option<WhiteName> {
        strip_prefix(&self.image_prefix, &trial.image).parse().ok()
    }
}
