// crates/darkframe-cli/src/cli.rs
//
// Argument surface. Parsing and path defaults only; the work lives in
// commands/.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use darkframe_core::transcript::CutPadding;
use darkframe_media::config::{FFMPEG_ENV, FFPROBE_ENV};
use darkframe_media::ExportCodec;

#[derive(Parser, Debug)]
#[command(name = "darkframe", version)]
#[command(about = "Cut filler words and unwanted takes out of talking-head video")]
#[command(long_about = "DarkFrame turns a word-timestamp transcript into an edited \
    timeline and exports it with ffmpeg.\n\n\
    EXAMPLES:\n    \
    darkframe words talk_words.json --count 40\n    \
    darkframe clean talk.mp4\n    \
    darkframe remove talk.mp4 3,17,18 --output talk_v2.mp4\n    \
    darkframe segments talk.mp4 3,17,18")]
pub struct Cli {
    /// ffmpeg binary [default: bundled copy, then PATH]
    #[arg(long, global = true, env = FFMPEG_ENV)]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe binary [default: bundled copy, then PATH]
    #[arg(long, global = true, env = FFPROBE_ENV)]
    pub ffprobe: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List transcript words with their ids (fillers marked *)
    Words {
        /// Word-timestamp JSON written by the transcriber
        words: PathBuf,

        /// Only show the first N words
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Cut every detected filler word and export `<stem>_clean.mp4`
    Clean {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Cut the given word ids and export `<stem>_edited.mp4`
    Remove {
        #[command(flatten)]
        input: InputArgs,

        /// Word ids to cut, comma separated (e.g. 1,5,10,15)
        #[arg(value_parser = parse_ids)]
        ids: WordIds,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Print the edited segment map as JSON without exporting
    Segments {
        #[command(flatten)]
        input: InputArgs,

        /// Word ids to cut [default: detected fillers]
        #[arg(value_parser = parse_ids)]
        ids: Option<WordIds>,
    },
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Source video
    pub video: PathBuf,

    /// Word-timestamp JSON [default: `<stem>_words.json` next to the video]
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Seconds cut before each removed word
    #[arg(long, default_value_t = CutPadding::default().before)]
    pub pad_before: f64,

    /// Seconds cut after each removed word
    #[arg(long, default_value_t = CutPadding::default().after)]
    pub pad_after: f64,
}

impl InputArgs {
    pub fn words_path(&self) -> PathBuf {
        self.words.clone().unwrap_or_else(|| sibling(&self.video, "words", "json"))
    }

    pub fn padding(&self) -> CutPadding {
        CutPadding { before: self.pad_before.max(0.0), after: self.pad_after.max(0.0) }
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Re-encode (H.264 / AAC) for frame-accurate cuts instead of stream copy
    #[arg(long)]
    pub reencode: bool,
}

impl ExportArgs {
    pub fn codec(&self) -> ExportCodec {
        if self.reencode { ExportCodec::Reencode } else { ExportCodec::StreamCopy }
    }

    /// `--output`, or `<stem>_<suffix>.mp4` next to the source.
    pub fn output_for(&self, video: &Path, suffix: &str) -> PathBuf {
        self.output.clone().unwrap_or_else(|| sibling(video, suffix, "mp4"))
    }
}

/// Comma separated transcript word ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordIds(pub Vec<usize>);

pub fn parse_ids(s: &str) -> Result<WordIds, String> {
    let ids = s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<usize>().map_err(|_| format!("invalid word id {part:?}")))
        .collect::<Result<Vec<_>, _>>()?;
    if ids.is_empty() {
        return Err("no word ids given".into());
    }
    Ok(WordIds(ids))
}

fn sibling(video: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = video.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    video.with_file_name(format!("{stem}_{suffix}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ids_accept_spaces_and_trailing_commas() {
        assert_eq!(parse_ids("1, 5,10,"), Ok(WordIds(vec![1, 5, 10])));
        assert!(parse_ids("1,x").is_err());
        assert!(parse_ids(" , ").is_err());
        assert!(parse_ids("-3").is_err());
    }

    #[test]
    fn default_paths_sit_next_to_the_video() {
        let cli = Cli::try_parse_from(["darkframe", "remove", "/v/talk.mp4", "2,3"]).unwrap();
        let Command::Remove { input, ids, export } = cli.command else {
            panic!("expected remove");
        };
        assert_eq!(ids, WordIds(vec![2, 3]));
        assert_eq!(input.words_path(), PathBuf::from("/v/talk_words.json"));
        assert_eq!(export.output_for(&input.video, "edited"), PathBuf::from("/v/talk_edited.mp4"));
        assert_eq!(export.codec(), ExportCodec::StreamCopy);
        assert_eq!(input.padding(), CutPadding::default());
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "darkframe", "clean", "talk.mp4",
            "--words", "w.json", "--pad-before", "0", "--output", "out.mp4", "--reencode",
        ]).unwrap();
        let Command::Clean { input, export } = cli.command else {
            panic!("expected clean");
        };
        assert_eq!(input.words_path(), PathBuf::from("w.json"));
        assert_eq!(input.padding().before, 0.0);
        assert_eq!(export.output_for(&input.video, "clean"), PathBuf::from("out.mp4"));
        assert_eq!(export.codec(), ExportCodec::Reencode);
    }

    #[test]
    fn segments_ids_are_optional() {
        let cli = Cli::try_parse_from(["darkframe", "segments", "talk.mp4"]).unwrap();
        assert!(matches!(cli.command, Command::Segments { ids: None, .. }));
    }
}
