//! odoo-tools entry point.
//! Parses the command line, discovers the project when a command needs it
//! and dispatches to the library.

use odoo_tools::{
    cli::{get_args, Args, Commands},
    error::{default_error_handler, Error, Result},
    git::{git_ignores_global, ignore_matcher, is_ignored},
    logger::init_logger,
    project::Project,
    release,
    runner::ShellRunner,
    yaml::get_migration_file_modules,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let runner = ShellRunner::new();

    match args.command {
        Commands::Bump(bump) => {
            release::bump(&runner, &bump.options())?;
        }
        Commands::Changelog { release_version } => {
            let version = match release_version {
                Some(version) => version,
                None => Project::discover()?.current_version()?,
            };
            release::changelog(&runner, &version)?;
        }
        Commands::Version => {
            println!("{}", Project::discover()?.current_version()?);
        }
        Commands::Context { key } => {
            let project = Project::discover()?;
            let context = project.cookiecutter_context()?;
            let value = match key {
                Some(key) => context.get(&key).ok_or_else(|| {
                    Error::config(format!("no key '{key}' in the cookiecutter context"))
                })?,
                None => context,
            };
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Commands::MigrationModules { file } => {
            let file = match file {
                Some(file) => file,
                None => Project::discover()?.migration_file(),
            };
            for module in get_migration_file_modules(file)? {
                println!("{module}");
            }
        }
        Commands::Ignores { global, paths } => {
            let cwd = std::env::current_dir()?;
            let (root, patterns) = if global {
                (cwd.clone(), git_ignores_global(&runner)?)
            } else {
                let project = Project::discover()?;
                let patterns = project.git_ignores()?;
                (project.root().to_path_buf(), patterns)
            };
            if paths.is_empty() {
                for pattern in patterns {
                    println!("{pattern}");
                }
            } else {
                let matcher = ignore_matcher(&root, &patterns)?;
                for path in paths {
                    let absolute = cwd.join(&path);
                    if is_ignored(&matcher, &absolute, absolute.is_dir()) {
                        println!("{}", path.display());
                    }
                }
            }
        }
    }

    Ok(())
}
