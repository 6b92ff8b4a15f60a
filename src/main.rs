use anyhow::{Context, Result};
use clap::Parser;
use gradebook::cli::{Cli, Command};
use gradebook::{GradebookManager, Settings, display, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let settings = Settings::load().context("failed to load settings")?;
    let connect = || {
        GradebookManager::connect(&settings)
            .with_context(|| format!("failed to open {}", settings.database_url))
    };

    match cli.command {
        Command::Setup => {
            connect()?.setup()?;
            println!("Tables created.");
        }
        Command::AddProfessor { name } => {
            let professor = connect()?.add_professor(&name)?;
            println!("Added professor {} with ID {}", professor.name, professor.id);
        }
        Command::AddCourse {
            code,
            name,
            professor,
        } => {
            let mut manager = connect()?;
            let course = manager.add_course(&code, &name)?;
            println!("Added course {} with ID {}", course.course_code, course.id);

            if let Some(professor_id) = professor {
                manager.assign_course(professor_id, course.id)?;
                println!("Assigned {} to professor {professor_id}", course.course_code);
            }
        }
        Command::Process {
            file,
            professor_id,
            course_id,
        } => {
            let report = gradebook::process(&settings, &file, &professor_id, &course_id)
                .with_context(|| format!("failed to process {}", file.display()))?;
            println!("{report}");
        }
        Command::ShowCourse { course_id } => display::show_course(&mut connect()?, course_id)?,
        Command::ShowRoster => display::show_roster(&mut connect()?)?,
    }

    Ok(())
}
