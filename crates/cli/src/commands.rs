//! Command handlers. Each writes its human-readable (or JSON) output to `out`.

use std::collections::HashMap;
use std::io::Write;

use anyhow::{anyhow, bail, Context};

use worktrack_analytics::{analyze_table, task_statistics, WorkAnalytics};
use worktrack_core::{EmployeeId, Entity, ProjectId, TaskId};
use worktrack_projects::{Project, Task};
use worktrack_staff::Employee;
use worktrack_store::WorkStore;
use worktrack_text::{
    extract_emails, extract_phone_numbers, format_currency, format_hours, read_csv_with,
    truncate_text, CsvOptions, DEFAULT_CURRENCY,
};

use crate::cli::{Command, CsvArgs, EmployeeCommand, ProjectCommand, TaskCommand};

const NAME_WIDTH: usize = 24;

pub fn execute<W: Write>(command: Command, store: &mut WorkStore, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Employee(cmd) => employee(cmd, store, out),
        Command::Project(cmd) => project(cmd, store, out),
        Command::Task(cmd) => task(cmd, store, out),
        Command::Report { json } => report(store, json, out),
        Command::Stats => stats(store, out),
        Command::Emails { text } => emails(&text, out),
        Command::Csv(args) => csv(&args, out),
    }
}

fn money(amount: f64) -> String {
    format_currency(amount, DEFAULT_CURRENCY)
}

fn find_employee(store: &mut WorkStore, id: EmployeeId) -> anyhow::Result<Employee> {
    store
        .get_employee_by_id(id)?
        .ok_or_else(|| anyhow!("employee {id} not found"))
}

fn find_project(store: &mut WorkStore, id: ProjectId) -> anyhow::Result<Project> {
    store
        .get_project_by_id(id)?
        .ok_or_else(|| anyhow!("project {id} not found"))
}

fn find_task(store: &mut WorkStore, id: TaskId) -> anyhow::Result<Task> {
    store
        .get_task_by_id(id)?
        .ok_or_else(|| anyhow!("task {id} not found"))
}

fn employee<W: Write>(cmd: EmployeeCommand, store: &mut WorkStore, out: &mut W) -> anyhow::Result<()> {
    match cmd {
        EmployeeCommand::Add { name, position, salary } => {
            let mut employee = Employee::new(name, position, salary)?;
            let id = store.add_employee(&mut employee)?;
            writeln!(out, "added employee {id}: {employee}")?;
        }
        EmployeeCommand::List { by_hours } => {
            let employees = store.get_all_employees()?;
            let listed: Vec<&Employee> = if by_hours {
                WorkAnalytics::new(&employees, &[]).employees_by_hours(true)
            } else {
                employees.iter().collect()
            };
            for e in listed {
                writeln!(
                    out,
                    "{:>4}  {:<NAME_WIDTH$}  {:<16}  {:>18}  {:>10}",
                    e.id().map(|id| id.to_string()).unwrap_or_default(),
                    truncate_text(e.name(), NAME_WIDTH),
                    truncate_text(e.position(), 16),
                    money(e.salary()),
                    format_hours(e.hours_worked()),
                )?;
            }
        }
        EmployeeCommand::Update { id, name, position, salary } => {
            let mut employee = find_employee(store, id)?;
            if let Some(name) = name {
                employee.set_name(name)?;
            }
            if let Some(position) = position {
                employee.set_position(position);
            }
            if let Some(salary) = salary {
                employee.set_salary(salary)?;
            }
            store.update_employee(&employee)?;
            writeln!(out, "updated employee {id}: {employee}")?;
        }
        EmployeeCommand::Delete { id } => {
            if !store.delete_employee(id)? {
                bail!("employee {id} not found");
            }
            writeln!(out, "deleted employee {id}")?;
        }
        EmployeeCommand::AddHours { id, hours } => {
            let mut employee = find_employee(store, id)?;
            employee.add_hours(hours)?;
            store.update_employee(&employee)?;
            writeln!(
                out,
                "{}: {} worked in total",
                employee.name(),
                format_hours(employee.hours_worked())
            )?;
        }
        EmployeeCommand::Pay { id } => {
            let employee = find_employee(store, id)?;
            writeln!(
                out,
                "{}: {} for {}",
                employee.name(),
                money(employee.calculate_pay()),
                format_hours(employee.hours_worked())
            )?;
        }
    }
    Ok(())
}

fn project<W: Write>(cmd: ProjectCommand, store: &mut WorkStore, out: &mut W) -> anyhow::Result<()> {
    match cmd {
        ProjectCommand::Add { title } => {
            let mut project = Project::new(title)?;
            let id = store.add_project(&mut project)?;
            writeln!(out, "added project {id}: {}", project.title())?;
        }
        ProjectCommand::List { by_progress } => {
            let projects = store.get_all_projects()?;
            let listed: Vec<&Project> = if by_progress {
                WorkAnalytics::new(&[], &projects).projects_by_progress(true)
            } else {
                projects.iter().collect()
            };
            for p in listed {
                writeln!(
                    out,
                    "{:>4}  {}  {}/{} tasks",
                    p.id().map(|id| id.to_string()).unwrap_or_default(),
                    p,
                    p.completed_tasks_count(),
                    p.task_count(),
                )?;
            }
        }
        ProjectCommand::Rename { id, title } => {
            let mut project = find_project(store, id)?;
            project.set_title(title)?;
            store.update_project(&project)?;
            writeln!(out, "renamed project {id} to {}", project.title())?;
        }
        ProjectCommand::Delete { id } => {
            let tasks = store.get_tasks_by_project(id)?.len();
            if !store.delete_project(id)? {
                bail!("project {id} not found");
            }
            writeln!(out, "deleted project {id} and {tasks} task(s)")?;
        }
        ProjectCommand::Progress { id } => {
            let project = find_project(store, id)?;
            writeln!(
                out,
                "{}: {:.1}% ({}/{} tasks completed)",
                project.title(),
                project.progress(),
                project.completed_tasks_count(),
                project.task_count()
            )?;
        }
    }
    Ok(())
}

fn task<W: Write>(cmd: TaskCommand, store: &mut WorkStore, out: &mut W) -> anyhow::Result<()> {
    match cmd {
        TaskCommand::Add { project, title, description } => {
            find_project(store, project)?;
            let mut task = Task::new(title, description, project)?;
            let id = store.add_task(&mut task)?;
            writeln!(out, "added task {id} to project {project}: {}", task.title())?;
        }
        TaskCommand::List { project } => {
            let tasks = match project {
                Some(id) => store.get_tasks_by_project(id)?,
                None => store.get_all_tasks()?,
            };
            let names: HashMap<EmployeeId, String> = store
                .get_all_employees()?
                .into_iter()
                .filter_map(|e| e.id().map(|id| (id, e.name().to_string())))
                .collect();

            for t in &tasks {
                let assignee = t
                    .assignee()
                    .and_then(|id| names.get(&id))
                    .map(String::as_str)
                    .unwrap_or("-");
                writeln!(
                    out,
                    "{:>4}  {}  project {}  assignee: {}",
                    t.id().map(|id| id.to_string()).unwrap_or_default(),
                    t,
                    t.project_id(),
                    assignee,
                )?;
            }
        }
        TaskCommand::Assign { task, employee } => {
            let mut t = find_task(store, task)?;
            find_employee(store, employee)?;
            t.assign_employee(employee);
            store.update_task(&t)?;
            let assignee = store
                .get_task_assignee(&t)?
                .with_context(|| format!("employee {employee} vanished while assigning"))?;
            writeln!(out, "task {task} assigned to {assignee}")?;
        }
        TaskCommand::Unassign { task } => {
            let mut t = find_task(store, task)?;
            t.unassign();
            store.update_task(&t)?;
            writeln!(out, "task {task} unassigned")?;
        }
        TaskCommand::Complete { task } => {
            let mut t = find_task(store, task)?;
            t.mark_complete();
            store.update_task(&t)?;
            writeln!(out, "{t}")?;
        }
        TaskCommand::Delete { task } => {
            if !store.delete_task(task)? {
                bail!("task {task} not found");
            }
            writeln!(out, "deleted task {task}")?;
        }
    }
    Ok(())
}

fn report<W: Write>(store: &mut WorkStore, json: bool, out: &mut W) -> anyhow::Result<()> {
    let employees = store.get_all_employees()?;
    let projects = store.get_all_projects()?;
    let report = WorkAnalytics::new(&employees, &projects).generate_report();

    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Employees:             {}", report.total_employees)?;
    writeln!(out, "Projects:              {}", report.total_projects)?;
    writeln!(out, "Total salary expenses: {}", money(report.total_salary_expenses))?;
    writeln!(out, "Total hours worked:    {}", format_hours(report.total_hours_worked))?;
    writeln!(out, "Average salary:        {}", money(report.average_salary))?;
    writeln!(out, "Overall progress:      {:.1}%", report.overall_progress)?;

    if !report.employees_summary.is_empty() {
        writeln!(out)?;
        for e in &report.employees_summary {
            writeln!(
                out,
                "  {:<NAME_WIDTH$}  {:>10}  {:>18}",
                truncate_text(&e.name, NAME_WIDTH),
                format_hours(e.hours_worked),
                money(e.pay)
            )?;
        }
    }
    if !report.projects_summary.is_empty() {
        writeln!(out)?;
        for p in &report.projects_summary {
            writeln!(
                out,
                "  {:<NAME_WIDTH$}  {:>6.1}%  {}/{}",
                truncate_text(&p.title, NAME_WIDTH),
                p.progress,
                p.completed_count,
                p.task_count
            )?;
        }
    }
    Ok(())
}

fn stats<W: Write>(store: &mut WorkStore, out: &mut W) -> anyhow::Result<()> {
    let projects = store.get_all_projects()?;
    let stats = task_statistics(&projects);
    writeln!(out, "Tasks:       {}", stats.total)?;
    writeln!(out, "Completed:   {} ({:.1}%)", stats.completed, stats.completion_rate)?;
    writeln!(out, "In progress: {}", stats.in_progress)?;
    writeln!(out, "Assigned:    {} ({:.1}%)", stats.assigned, stats.assignment_rate)?;
    writeln!(out, "Unassigned:  {}", stats.unassigned)?;
    Ok(())
}

fn emails<W: Write>(text: &str, out: &mut W) -> anyhow::Result<()> {
    for email in extract_emails(text) {
        writeln!(out, "email: {email}")?;
    }
    for phone in extract_phone_numbers(text) {
        writeln!(out, "phone: {phone}")?;
    }
    Ok(())
}

fn csv<W: Write>(args: &CsvArgs, out: &mut W) -> anyhow::Result<()> {
    let options = CsvOptions {
        delimiter: delimiter_byte(args.delimiter)?,
        drop_incomplete: !args.keep_incomplete,
    };
    let table = read_csv_with(&args.path, options)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let analysis = analyze_table(&table);

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &analysis)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{} rows, {} columns", analysis.rows, analysis.columns)?;
    for column in &analysis.column_summaries {
        writeln!(
            out,
            "  {:<NAME_WIDTH$}  {:<8}  missing {}",
            truncate_text(&column.name, NAME_WIDTH),
            column.column_type.as_str(),
            column.missing
        )?;
    }
    for stats in &analysis.numeric_stats {
        let std = stats.std.map(|s| format!("{s:.3}")).unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "  {}: mean {:.3}, median {:.3}, min {}, max {}, std {}",
            stats.column, stats.mean, stats.median, stats.min, stats.max, std
        )?;
    }
    Ok(())
}

fn delimiter_byte(delimiter: char) -> anyhow::Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("delimiter must be a single ASCII character, got {delimiter:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use worktrack_store::StoreConfig;

    fn store() -> WorkStore {
        WorkStore::open(StoreConfig::in_memory()).unwrap()
    }

    fn run(store: &mut WorkStore, command: Command) -> anyhow::Result<String> {
        let mut out = Vec::new();
        execute(command, store, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn add_employee(store: &mut WorkStore, name: &str, salary: f64) {
        let cmd = EmployeeCommand::Add {
            name: name.to_string(),
            position: "Engineer".to_string(),
            salary,
        };
        run(store, Command::Employee(cmd)).unwrap();
    }

    #[test]
    fn employee_hours_and_pay() {
        let mut store = store();
        add_employee(&mut store, "Anna", 100_000.0);

        let id = EmployeeId::new(1);
        let output = run(&mut store, Command::Employee(EmployeeCommand::AddHours { id, hours: 176.0 })).unwrap();
        assert_eq!(output, "Anna: 176.0 h worked in total\n");

        let output = run(&mut store, Command::Employee(EmployeeCommand::Pay { id })).unwrap();
        assert_eq!(output, "Anna: 100 000.00 ₽ for 176.0 h\n");
    }

    #[test]
    fn negative_hours_are_rejected_and_not_saved() {
        let mut store = store();
        add_employee(&mut store, "Anna", 100_000.0);

        let id = EmployeeId::new(1);
        assert!(run(&mut store, Command::Employee(EmployeeCommand::AddHours { id, hours: -1.0 })).is_err());
        assert_eq!(store.get_employee_by_id(id).unwrap().unwrap().hours_worked(), 0.0);
    }

    #[test]
    fn missing_rows_are_errors() {
        let mut store = store();
        let err = run(&mut store, Command::Employee(EmployeeCommand::Pay { id: EmployeeId::new(9) })).unwrap_err();
        assert_eq!(err.to_string(), "employee 9 not found");

        let err = run(&mut store, Command::Project(ProjectCommand::Delete { id: ProjectId::new(9) })).unwrap_err();
        assert_eq!(err.to_string(), "project 9 not found");

        let cmd = TaskCommand::Add {
            project: ProjectId::new(9),
            title: "orphan".to_string(),
            description: String::new(),
        };
        assert!(run(&mut store, Command::Task(cmd)).is_err());
    }

    #[test]
    fn task_lifecycle_through_commands() {
        let mut store = store();
        add_employee(&mut store, "Boris", 50_000.0);
        run(&mut store, Command::Project(ProjectCommand::Add { title: "Site".to_string() })).unwrap();

        let add = TaskCommand::Add {
            project: ProjectId::new(1),
            title: "Design".to_string(),
            description: String::new(),
        };
        assert_eq!(
            run(&mut store, Command::Task(add)).unwrap(),
            "added task 1 to project 1: Design\n"
        );

        let assign = TaskCommand::Assign {
            task: TaskId::new(1),
            employee: EmployeeId::new(1),
        };
        assert_eq!(
            run(&mut store, Command::Task(assign)).unwrap(),
            "task 1 assigned to Boris (Engineer)\n"
        );

        let listed = run(&mut store, Command::Task(TaskCommand::List { project: None })).unwrap();
        assert!(listed.contains("Design [in progress]"));
        assert!(listed.contains("assignee: Boris"));

        run(&mut store, Command::Task(TaskCommand::Complete { task: TaskId::new(1) })).unwrap();
        let progress = run(&mut store, Command::Project(ProjectCommand::Progress { id: ProjectId::new(1) })).unwrap();
        assert_eq!(progress, "Site: 100.0% (1/1 tasks completed)\n");

        let stats = run(&mut store, Command::Stats).unwrap();
        assert!(stats.contains("Completed:   1 (100.0%)"));
        assert!(stats.contains("Assigned:    1 (100.0%)"));

        let deleted = run(&mut store, Command::Project(ProjectCommand::Delete { id: ProjectId::new(1) })).unwrap();
        assert_eq!(deleted, "deleted project 1 and 1 task(s)\n");
        assert!(store.get_all_tasks().unwrap().is_empty());
    }

    #[test]
    fn assigning_unknown_employee_fails() {
        let mut store = store();
        run(&mut store, Command::Project(ProjectCommand::Add { title: "Site".to_string() })).unwrap();
        let add = TaskCommand::Add {
            project: ProjectId::new(1),
            title: "Design".to_string(),
            description: String::new(),
        };
        run(&mut store, Command::Task(add)).unwrap();

        let assign = TaskCommand::Assign {
            task: TaskId::new(1),
            employee: EmployeeId::new(42),
        };
        let err = run(&mut store, Command::Task(assign)).unwrap_err();
        assert_eq!(err.to_string(), "employee 42 not found");
    }

    #[test]
    fn report_as_json() {
        let mut store = store();
        add_employee(&mut store, "Anna", 176_000.0);
        run(&mut store, Command::Employee(EmployeeCommand::AddHours { id: EmployeeId::new(1), hours: 10.0 })).unwrap();

        let output = run(&mut store, Command::Report { json: true }).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["total_employees"], 1);
        assert_eq!(json["total_salary_expenses"], 10_000.0);

        let text = run(&mut store, Command::Report { json: false }).unwrap();
        assert!(text.contains("Total salary expenses: 10 000.00 ₽"));
    }

    #[test]
    fn emails_and_phones_are_extracted() {
        let mut store = store();
        let text = "write to anna@example.com or call +7 (912) 345-67-89".to_string();
        let output = run(&mut store, Command::Emails { text }).unwrap();
        assert!(output.starts_with("email: anna@example.com\n"));
        assert!(output.contains("phone: "));
        // Nothing above needs the database.
        assert!(!store.is_connected());
    }

    #[test]
    fn csv_profile_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hours.csv");
        std::fs::write(&path, "name;hours\nAnna;10\nBoris;\nVera;20\n").unwrap();

        let mut store = store();
        let args = CsvArgs {
            path,
            delimiter: ';',
            keep_incomplete: false,
            json: false,
        };
        let output = run(&mut store, Command::Csv(args)).unwrap();
        assert!(output.starts_with("2 rows, 2 columns\n"));
        assert!(output.contains("hours: mean 15.000, median 15.000, min 10, max 20"));

        let args = CsvArgs {
            path: dir.path().join("missing.csv"),
            delimiter: ',',
            keep_incomplete: false,
            json: false,
        };
        let err = run(&mut store, Command::Csv(args)).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn delimiter_must_be_ascii() {
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('é').is_err());
    }
}
