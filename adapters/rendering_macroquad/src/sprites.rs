use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use macroquad::{
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};
use reef_defence_core::{Owner, TileKind, UnitTier};
use reef_defence_rendering::Color;

use crate::to_macroquad_color;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Identifies one texture in the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum SpriteKey {
    /// Texture of a map tile kind.
    Tile(TileKind),
    /// Texture of a unit belonging to `Owner` at the given tier.
    Unit(Owner, UnitTier),
}

impl SpriteKey {
    /// Every key the manifest has to provide, tiles first.
    fn all() -> Vec<Self> {
        let tiles = TileKind::ALL.into_iter().map(Self::Tile);
        let units = [Owner::Player, Owner::Enemy].into_iter().flat_map(|owner| {
            UnitTier::ALL
                .into_iter()
                .map(move |tier| Self::Unit(owner, tier))
        });
        tiles.chain(units).collect()
    }

    fn name(self) -> String {
        match self {
            Self::Tile(kind) => kind.tag().to_owned(),
            Self::Unit(Owner::Player, tier) => format!("player{}", tier.get()),
            Self::Unit(Owner::Enemy, tier) => format!("enemy{}", tier.get()),
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|key| key.name() == name)
    }
}

/// Parameters describing how a sprite should be drawn on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DrawParams {
    /// Position in screen-space pixels where the sprite's top-left corner is placed.
    pub(crate) position: Vec2,
    /// Desired size in screen-space pixels.
    pub(crate) size: Vec2,
    /// Tint applied to the sprite.
    pub(crate) tint: Color,
}

impl DrawParams {
    /// Creates untinted draw parameters covering the given rectangle.
    #[must_use]
    pub(crate) fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            tint: Color::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Overrides the tint colour used when drawing the sprite.
    #[must_use]
    pub(crate) fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }
}

/// Cache of textures loaded from the sprite manifest.
#[derive(Debug)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl SpriteAtlas {
    /// Loads sprites from the manifest located at the provided path.
    pub(crate) fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Draws the requested sprite, returning `false` when the atlas lacks it.
    pub(crate) fn draw(&self, key: SpriteKey, params: DrawParams) -> bool {
        let Some(texture) = self.textures.get(&key).copied() else {
            return false;
        };

        let draw_params = DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(params.size.x, params.size.y)),
            ..DrawTextureParams::default()
        };
        texture::draw_texture_ex(
            texture,
            params.position.x,
            params.position.y,
            to_macroquad_color(params.tint),
            draw_params,
        );
        true
    }

    /// Number of textures stored in the atlas.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.textures.len()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        Self::from_entries(entries, &mut loader)
    }

    fn from_entries(
        entries: Vec<(SpriteKey, PathBuf)>,
        loader: &mut impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (key, path) in entries {
            let texture = loader(key, &path).with_context(|| {
                format!("failed to load sprite {key:?} from {}", path.display())
            })?;
            if textures.insert(key, texture).is_some() {
                bail!("duplicate sprite entry for {key:?}");
            }
        }
        Ok(Self { textures })
    }
}

fn default_loader(_key: SpriteKey, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    tiles: HashMap<String, String>,
    units: HashMap<String, String>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(SpriteKey, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    let sections = [("tiles", manifest.tiles), ("units", manifest.units)];
    for (section, sprites) in sections {
        for (name, relative_path) in sprites {
            let key = match SpriteKey::from_name(&name) {
                Some(key @ SpriteKey::Tile(_)) if section == "tiles" => key,
                Some(key @ SpriteKey::Unit(..)) if section == "units" => key,
                _ => bail!("unknown sprite key `{name}` in [{section}]"),
            };
            let _ = resolved.insert(key, base_path.join(relative_path));
        }
    }

    let all = SpriteKey::all();
    let mut ordered = Vec::with_capacity(all.len());
    for key in all {
        let Some(path) = resolved.remove(&key) else {
            bail!("sprite manifest missing entry for `{}`", key.name());
        };
        ordered.push((key, path));
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reef_defence_core::CastleLevel;
    use std::{cell::RefCell, fmt::Write};

    fn full_manifest() -> String {
        let mut manifest = String::from("version = 1\n\n[tiles]\n");
        for kind in TileKind::ALL {
            let tag = kind.tag();
            writeln!(manifest, "{tag} = \"tiles/{tag}.png\"").expect("string write");
        }
        manifest.push_str("\n[units]\n");
        for key in SpriteKey::all()
            .into_iter()
            .filter(|key| matches!(key, SpriteKey::Unit(..)))
        {
            let name = key.name();
            writeln!(manifest, "{name} = \"units/{name}.png\"").expect("string write");
        }
        manifest
    }

    #[test]
    fn sprite_names_round_trip() {
        for key in SpriteKey::all() {
            assert_eq!(SpriteKey::from_name(&key.name()), Some(key));
        }
        assert_eq!(SpriteKey::all().len(), 20);
        assert_eq!(
            SpriteKey::from_name("castleV3"),
            CastleLevel::new(3).map(|level| SpriteKey::Tile(TileKind::Castle(level)))
        );
    }

    #[test]
    fn parse_manifest_requires_all_known_keys() {
        let manifest = full_manifest().replace("enemy5 = \"units/enemy5.png\"\n", "");
        let result = parse_manifest(&manifest, Path::new("assets"));
        assert!(result.is_err(), "manifest missing enemy5 should fail");
    }

    #[test]
    fn manifest_rejects_keys_in_the_wrong_section() {
        let manifest = full_manifest().replace("[units]\n", "[units]\nsea = \"sea.png\"\n");
        let result = parse_manifest(&manifest, Path::new("assets"));
        assert!(result.is_err(), "tile keys must live under [tiles]");
    }

    #[test]
    fn manifest_rejects_other_versions() {
        let manifest = full_manifest().replace("version = 1", "version = 2");
        assert!(parse_manifest(&manifest, Path::new("assets")).is_err());
    }

    #[test]
    fn manifest_resolves_paths_relative_to_base_directory() {
        let parsed =
            parse_manifest(&full_manifest(), Path::new("root")).expect("manifest should parse");
        assert_eq!(
            parsed[1],
            (
                SpriteKey::Tile(TileKind::Sea),
                PathBuf::from("root/tiles/sea.png")
            )
        );
        let tier = UnitTier::new(2).expect("valid tier");
        assert!(parsed.contains(&(
            SpriteKey::Unit(Owner::Enemy, tier),
            PathBuf::from("root/units/enemy2.png")
        )));
    }

    #[test]
    fn atlas_loads_textures_using_deterministic_order() {
        let entries = parse_manifest(&full_manifest(), Path::new("assets"))
            .expect("manifest should parse into canonical order");
        let load_order = RefCell::new(Vec::new());
        let atlas = SpriteAtlas::from_entries(entries, &mut |key, _| {
            load_order.borrow_mut().push(key);
            Ok(Texture2D::empty())
        })
        .expect("atlas should load using provided loader");

        assert_eq!(load_order.borrow().as_slice(), SpriteKey::all().as_slice());
        assert_eq!(atlas.len(), SpriteKey::all().len());
    }

    #[test]
    fn bundled_manifest_lists_existing_files() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/manifest.toml");
        let contents = fs::read_to_string(&path).expect("bundled manifest is readable");
        let base = path.parent().expect("manifest has a parent directory");
        let entries = parse_manifest(&contents, base).expect("bundled manifest parses");
        assert_eq!(entries.len(), SpriteKey::all().len());
        for (key, sprite) in entries {
            assert!(sprite.is_file(), "{key:?} points at missing {}", sprite.display());
        }
    }

    #[test]
    fn atlas_rejects_duplicate_entries() {
        let key = SpriteKey::Tile(TileKind::Sea);
        let entries = vec![
            (key, PathBuf::from("a.png")),
            (key, PathBuf::from("b.png")),
        ];
        let result = SpriteAtlas::from_entries(entries, &mut |_, _| Ok(Texture2D::empty()));
        assert!(result.is_err());
    }
}
