use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use lectern_common::{BlockVector, RegistryError, RegistrySnapshot};
use lectern_logger::LogReporter;
use lectern_nbt::{NbtError, NbtFile};
use lectern_schematic::format::{BLOCK_MAPPING, ITEM_MAPPING};
use lectern_schematic::{
    Clipboard, IdMap, RemapTable, SchematicError, SchematicReader, SchematicWriter,
};
use lectern_world::{ChunkError, LegacyChunkStore};

pub const USAGE: &str = "\
usage: lectern inspect <file.schematic> [registry.json]
       lectern remap <in.schematic> <out.schematic> <registry.json>
       lectern chunk <world-dir> <x> <y> <z>";

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Schematic(#[from] SchematicError),

    #[error(transparent)]
    Chunk(#[from] ChunkError),

    #[error("could not load registry: {0}")]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<NbtError> for CommandError {
    fn from(err: NbtError) -> Self {
        CommandError::Schematic(err.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Inspect {
        schematic: PathBuf,
        registry: Option<PathBuf>,
    },
    Remap {
        input: PathBuf,
        output: PathBuf,
        registry: PathBuf,
    },
    Chunk {
        world: PathBuf,
        position: BlockVector,
    },
}

impl Command {
    /// Parses the arguments following the program name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command, CommandError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match args.as_slice() {
            ["inspect", schematic] => Ok(Command::Inspect {
                schematic: schematic.into(),
                registry: None,
            }),
            ["inspect", schematic, registry] => Ok(Command::Inspect {
                schematic: schematic.into(),
                registry: Some(registry.into()),
            }),
            ["remap", input, output, registry] => Ok(Command::Remap {
                input: input.into(),
                output: output.into(),
                registry: registry.into(),
            }),
            ["chunk", world, x, y, z] => Ok(Command::Chunk {
                world: world.into(),
                position: BlockVector::new(coordinate(x)?, coordinate(y)?, coordinate(z)?),
            }),
            [] => Err(CommandError::Usage("no command given".to_string())),
            [name, ..] => Err(CommandError::Usage(format!(
                "unknown command or wrong arguments for {:?}",
                name
            ))),
        }
    }

    pub fn run<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        match self {
            Command::Inspect {
                schematic,
                registry,
            } => {
                let registry = match registry {
                    Some(path) => RegistrySnapshot::load(path)?,
                    None => RegistrySnapshot::new(),
                };
                inspect(&open_schematic(schematic)?, &registry, out)
            }
            Command::Remap {
                input,
                output,
                registry,
            } => {
                let registry = RegistrySnapshot::load(registry)?;
                let file = open_schematic(input)?;
                let clipboard = SchematicReader::new(&registry, &LogReporter).read(&file)?;
                let written = SchematicWriter::new(&registry, &LogReporter).write(&clipboard)?;
                let mut writer = BufWriter::new(File::create(output)?);
                written.write_gzip(&mut writer)?;
                writer.flush()?;
                log::info!("wrote {} cells to {}", clipboard.region().volume(), output.display());
                Ok(())
            }
            Command::Chunk { world, position } => {
                let store = LegacyChunkStore::new(world);
                let cell = store.chunk_at(*position)?.block(*position)?;
                writeln!(out, "{} {}:{}", position, cell.id, cell.data)?;
                if let Some(id) = cell.nbt_id() {
                    writeln!(out, "tile entity: {}", id)?;
                }
                Ok(())
            }
        }
    }
}

fn coordinate(value: &str) -> Result<i32, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::Usage(format!("{:?} is not a block coordinate", value)))
}

/// Opens a schematic whether or not it is gzip-compressed.
fn open_schematic(path: &Path) -> Result<NbtFile, CommandError> {
    let mut reader = BufReader::new(File::open(path)?);
    Ok(NbtFile::read_auto(&mut reader)?)
}

fn inspect<W: Write>(
    file: &NbtFile,
    registry: &RegistrySnapshot,
    out: &mut W,
) -> Result<(), CommandError> {
    let clipboard: Clipboard = SchematicReader::new(registry, &LogReporter).read(file)?;
    let region = clipboard.region();
    writeln!(
        out,
        "size: {}x{}x{}",
        region.width, region.height, region.length
    )?;
    writeln!(out, "minimum: {}", region.min)?;
    writeln!(out, "origin: {}", clipboard.origin())?;
    let solid = clipboard.cells().iter().filter(|cell| !cell.is_air()).count();
    writeln!(out, "blocks: {} of {}", solid, region.volume())?;
    writeln!(out, "tile entities: {}", clipboard.tile_entity_count())?;
    writeln!(out, "entities: {}", clipboard.entities().len())?;

    // Mapping sections as stored, before translation into the registry
    let schematic = file.root_compound();
    let table = RemapTable::from_mapping_tags(
        schematic.and_then(|root| root.get_compound(BLOCK_MAPPING)),
        schematic.and_then(|root| root.get_compound(ITEM_MAPPING)),
    )
    .map_err(SchematicError::from)?;
    print_mapping(out, BLOCK_MAPPING, &table.blocks)?;
    print_mapping(out, ITEM_MAPPING, &table.items)?;
    Ok(())
}

fn print_mapping<W: Write>(out: &mut W, section: &str, mapping: &IdMap) -> io::Result<()> {
    if mapping.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}:", section)?;
    for (name, id) in mapping.iter() {
        writeln!(out, "  {:>5} {}", id, name)?;
    }
    Ok(())
}
