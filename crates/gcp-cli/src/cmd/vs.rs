use crate::output::{print_cancelled, print_command, print_json, print_lines};
use crate::prompt::Chooser;
use anyhow::Context;
use gcp_core::config::{Config, Place};
use gcp_core::history::{rank, HistoryStore};
use gcp_core::paths::{self, PLACES_NAMESPACE};
use gcp_core::workspace::{dir_name, resolve_dir, Location, OpenCommand};
use gcp_core::GcpError;
use serde::Serialize;
use std::path::PathBuf;

/// Everything `vs` reads from the environment, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct VsContext {
    pub home: PathBuf,
    pub config: Config,
}

#[derive(Debug, Clone, Default)]
pub struct VsArgs {
    pub place: Option<String>,
    pub dir: Option<String>,
    pub print: bool,
    pub list: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct Resolved<'a> {
    place: &'a str,
    dir: &'a str,
    target: String,
}

pub fn run(ctx: &VsContext, args: VsArgs, chooser: &mut dyn Chooser) -> anyhow::Result<()> {
    let store = ctx.config.history_store(&ctx.home);

    let place_name = match args.place {
        Some(p) => p,
        None => {
            let history = store
                .load(PLACES_NAMESPACE)
                .context("failed to load place history")?;
            let places = rank(&history, &ctx.config.place_names());
            if args.list {
                return emit(&places, args.json);
            }
            match chooser.choose("where", &places)? {
                Some(p) => p,
                None => {
                    print_cancelled();
                    return Ok(());
                }
            }
        }
    };

    let place = find_place(ctx, &place_name)?;
    tracing::debug!(place = %place.name, remote = ?place.remote, "place");
    if !args.list {
        store
            .record(PLACES_NAMESPACE, &place.name)
            .context("failed to save place history")?;
    }

    let location = Location::resolve(&place, &ctx.home)
        .with_context(|| format!("failed to reach place '{}'", place.name))?;
    let prefix = location.root_prefix(&place);
    let candidates = location
        .list(&prefix)
        .with_context(|| format!("failed to list directories in '{}'", place.name))?;
    tracing::debug!(location = ?location, dirs = ?candidates, "candidates");

    if args.list {
        let history = store.load(&place.name)?;
        return emit(&rank(&history, &candidates), args.json);
    }

    let mut dir = match args.dir.as_deref() {
        Some(arg) => {
            let dir = resolve_dir(&candidates, arg)
                .cloned()
                .ok_or_else(|| GcpError::DirNotFound {
                    place: place.name.clone(),
                    dir: arg.to_string(),
                })?;
            store.record(&place.name, &dir)?;
            dir
        }
        None => match select(chooser, &store, &place.name, "which", &candidates)? {
            Some(dir) => dir,
            None => {
                print_cancelled();
                return Ok(());
            }
        },
    };

    let marker = dir_name(&dir).to_string();
    if ctx.config.is_nested(&marker) {
        let namespace = paths::nested_namespace(&place.name, &marker);
        let nested = location
            .list(&dir)
            .with_context(|| format!("failed to list directories in '{dir}'"))?;
        dir = match select(chooser, &store, &namespace, "which", &nested)? {
            Some(d) => d,
            None => {
                print_cancelled();
                return Ok(());
            }
        };
    }
    tracing::debug!(%dir, "dir");

    let target = location.target(&dir);
    if args.print {
        if args.json {
            print_json(&Resolved {
                place: &place.name,
                dir: &dir,
                target: target.to_string(),
            })?;
        } else {
            println!("{target}");
        }
        return Ok(());
    }

    let cmd = OpenCommand::new(&ctx.config.editor, &target);
    print_command(&cmd.to_string());
    cmd.run().context("failed to open editor")?;
    Ok(())
}

/// Configured places win; any other name must be an existing `~/<name>`.
fn find_place(ctx: &VsContext, name: &str) -> anyhow::Result<Place> {
    if let Some(place) = ctx.config.place(name) {
        return Ok(place.clone());
    }
    paths::validate_namespace(name)?;
    if ctx.home.join(name).is_dir() {
        return Ok(Place::local(name));
    }
    Err(GcpError::UnknownPlace(name.to_string()).into())
}

/// Offer `candidates` ranked by the `namespace` history and record the pick.
fn select(
    chooser: &mut dyn Chooser,
    store: &HistoryStore,
    namespace: &str,
    prompt: &str,
    candidates: &[String],
) -> anyhow::Result<Option<String>> {
    let history = store.load(namespace)?;
    let ranked = rank(&history, candidates);
    let Some(picked) = chooser.choose(prompt, &ranked)? else {
        return Ok(None);
    };
    store.record(namespace, &picked)?;
    Ok(Some(picked))
}

fn emit(items: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&items)
    } else {
        print_lines(items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Answers prompts from a queue and remembers what it was offered.
    struct Scripted {
        answers: Vec<Option<&'static str>>,
        offered: Vec<Vec<String>>,
    }

    impl Scripted {
        fn new(answers: Vec<Option<&'static str>>) -> Self {
            Self {
                answers,
                offered: Vec::new(),
            }
        }
    }

    impl Chooser for Scripted {
        fn choose(&mut self, _prompt: &str, options: &[String]) -> anyhow::Result<Option<String>> {
            self.offered.push(options.to_vec());
            let answer = self.answers.remove(0);
            Ok(answer.map(str::to_string))
        }
    }

    fn setup() -> (TempDir, VsContext) {
        let home = TempDir::new().unwrap();
        for d in ["github/alpha", "github/beta", "github/abc/inner", "other/x"] {
            std::fs::create_dir_all(home.path().join(d)).unwrap();
        }
        let ctx = VsContext {
            home: home.path().to_path_buf(),
            config: Config {
                places: vec![Place::local("github"), Place::local("other")],
                ..Config::default()
            },
        };
        (home, ctx)
    }

    fn history(home: &TempDir, ns: &str) -> String {
        std::fs::read_to_string(home.path().join(format!(".vs_history-{ns}"))).unwrap()
    }

    fn printing() -> VsArgs {
        VsArgs {
            print: true,
            ..VsArgs::default()
        }
    }

    #[test]
    fn prompts_are_ranked_and_picks_recorded() {
        let (home, ctx) = setup();
        std::fs::write(home.path().join(".vs_history-places"), "other\n").unwrap();
        std::fs::write(home.path().join(".vs_history-github"), "github/beta/\n").unwrap();

        let mut chooser = Scripted::new(vec![Some("github"), Some("github/alpha/")]);
        run(&ctx, printing(), &mut chooser).unwrap();

        assert_eq!(chooser.offered[0], vec!["other", "github"]);
        assert_eq!(
            chooser.offered[1],
            vec!["github/beta/", "github/abc/", "github/alpha/"]
        );
        assert_eq!(history(&home, "places"), "github\nother\n");
        assert_eq!(history(&home, "github"), "github/alpha/\ngithub/beta/\n");
    }

    #[test]
    fn explicit_place_and_dir_skip_prompts() {
        let (home, ctx) = setup();
        let mut chooser = Scripted::new(vec![]);
        let args = VsArgs {
            place: Some("github".into()),
            dir: Some("beta".into()),
            ..printing()
        };
        run(&ctx, args, &mut chooser).unwrap();
        assert!(chooser.offered.is_empty());
        assert_eq!(history(&home, "github"), "github/beta/\n");
    }

    #[test]
    fn nested_marker_prompts_second_level() {
        let (home, ctx) = setup();
        let mut chooser = Scripted::new(vec![Some("github/abc/inner/")]);
        let args = VsArgs {
            place: Some("github".into()),
            dir: Some("abc".into()),
            ..printing()
        };
        run(&ctx, args, &mut chooser).unwrap();
        assert_eq!(chooser.offered, vec![vec!["github/abc/inner/".to_string()]]);
        assert_eq!(history(&home, "github-abc"), "github/abc/inner/\n");
    }

    #[test]
    fn cancelled_prompt_records_nothing_more() {
        let (home, ctx) = setup();
        let mut chooser = Scripted::new(vec![None]);
        run(&ctx, printing(), &mut chooser).unwrap();
        assert!(!home.path().join(".vs_history-places").exists());
    }

    #[test]
    fn list_does_not_record() {
        let (home, ctx) = setup();
        let mut chooser = Scripted::new(vec![]);
        let args = VsArgs {
            place: Some("github".into()),
            list: true,
            ..VsArgs::default()
        };
        run(&ctx, args, &mut chooser).unwrap();
        assert!(!home.path().join(".vs_history-places").exists());
        assert!(chooser.offered.is_empty());
    }

    #[test]
    fn unconfigured_existing_dir_is_a_place() {
        let (home, ctx) = setup();
        std::fs::create_dir_all(home.path().join("scratch/tmp1")).unwrap();
        let mut chooser = Scripted::new(vec![]);
        let args = VsArgs {
            place: Some("scratch".into()),
            dir: Some("tmp1".into()),
            ..printing()
        };
        run(&ctx, args, &mut chooser).unwrap();
        assert_eq!(history(&home, "scratch"), "scratch/tmp1/\n");
    }

    #[test]
    fn unknown_place_and_dir_fail() {
        let (_home, ctx) = setup();
        let mut chooser = Scripted::new(vec![]);
        let err = run(
            &ctx,
            VsArgs {
                place: Some("nowhere".into()),
                ..printing()
            },
            &mut chooser,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown place"));

        let err = run(
            &ctx,
            VsArgs {
                place: Some("github".into()),
                dir: Some("gamma".into()),
                ..printing()
            },
            &mut chooser,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no directory matching 'gamma'"));
    }
}
