//! Command handlers. Each receives the shell context and the tokens after the
//! command name.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};

use spendwise_config::CONFIG_KEYS;
use spendwise_core::{BillService, CurrencyFormatter};
use spendwise_domain::{
    serde_date::parse_calendar_date, Bill, BillStatus, Displayable, Expense, Income,
    ReportPeriod, DEFAULT_EXPENSE_CATEGORY,
};

use crate::{
    cli::{
        context::ShellContext,
        error::{CommandError, CommandResult},
        help, output,
        registry::{CommandEntry, CommandRegistry},
        render,
    },
    currency::{format_date, parse_currency},
    utils::build_info,
};

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "help",
        "List commands or describe one",
        "help [command]",
        cmd_help,
    ));
    registry.register(CommandEntry::new(
        "version",
        "Show build information",
        "version",
        cmd_version,
    ));
    registry.register(CommandEntry::new(
        "load",
        "Load a JSON snapshot of expenses, income and bills",
        "load <path>",
        cmd_load,
    ));
    registry.register(CommandEntry::new(
        "save",
        "Write the records to the open snapshot file or to a new path",
        "save [path]",
        cmd_save,
    ));
    registry.register(CommandEntry::new(
        "add",
        "Record an expense, income or bill",
        "add expense <amount> <description> [category] [YYYY-MM-DD] | \
         add income <amount> <source> [YYYY-MM-DD] | \
         add bill <name> <amount> <YYYY-MM-DD> [--recurring] [--reminder]",
        cmd_add,
    ));
    registry.register(CommandEntry::new(
        "edit",
        "Change one field of an expense",
        "edit expense <id> <amount|description|category|date|notes> <value>",
        cmd_edit,
    ));
    registry.register(CommandEntry::new(
        "pay",
        "Mark a bill as paid",
        "pay <bill-id> [YYYY-MM-DD]",
        cmd_pay,
    ));
    registry.register(CommandEntry::new(
        "delete",
        "Remove an expense, income or bill",
        "delete <expense|income|bill> <id>",
        cmd_delete,
    ));
    registry.register(CommandEntry::new(
        "dashboard",
        "Current month totals, categories and upcoming bills",
        "dashboard",
        cmd_dashboard,
    ));
    registry.register(CommandEntry::new(
        "report",
        "Period report with top categories, trend and statistics",
        "report [month|year]",
        cmd_report,
    ));
    registry.register(CommandEntry::new(
        "trend",
        "Monthly income and expenses ending this month",
        "trend [months]",
        cmd_trend,
    ));
    registry.register(CommandEntry::new(
        "bills",
        "Upcoming and overdue bills",
        "bills [--sorted]",
        cmd_bills,
    ));
    registry.register(CommandEntry::new(
        "categories",
        "Spending by category for the current month",
        "categories",
        cmd_categories,
    ));
    registry.register(CommandEntry::new(
        "search",
        "Find records by text",
        "search <expenses|income|bills> <query>",
        cmd_search,
    ));
    registry.register(CommandEntry::new(
        "reminders",
        "Reminders scheduled from today",
        "reminders",
        cmd_reminders,
    ));
    registry.register(CommandEntry::new(
        "check",
        "Report anomalies in the loaded records",
        "check",
        cmd_check,
    ));
    registry.register(CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [key] [value]",
        cmd_config,
    ));
    registry.register(CommandEntry::new(
        "today",
        "Show or pin the reference date",
        "today [YYYY-MM-DD|reset]",
        cmd_today,
    ));
    registry.register(CommandEntry::new(
        "exit",
        "Leave the shell",
        "exit",
        cmd_exit,
    ));
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        output::line(line);
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, CommandError> {
    parse_calendar_date(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{raw}` is not a YYYY-MM-DD date"))
    })
}

fn parse_amount_arg(raw: &str) -> Result<f64, CommandError> {
    parse_currency(raw)
        .filter(|amount| *amount >= 0.0)
        .ok_or_else(|| CommandError::InvalidArguments(format!("`{raw}` is not an amount")))
}

fn required_text(raw: &str, what: &str) -> Result<String, CommandError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(CommandError::InvalidArguments(format!("{what} cannot be empty")));
    }
    Ok(text.to_string())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        None => help::print_overview(&context.registry),
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_lines(build_info::current().summary_lines());
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: load <path>".to_string(),
        ));
    };
    let path = PathBuf::from(*path);
    let count = context.load_snapshot(path.clone())?;
    output::success(format!("Loaded {count} records from {}.", path.display()));

    let warnings = context.session.warnings();
    if !warnings.is_empty() {
        output::warning(format!(
            "{} record issue(s) found. Run `check` for details.",
            warnings.len()
        ));
    }

    context.config.last_snapshot = Some(path);
    context.persist_config()
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => context.snapshot_path.clone().ok_or_else(|| {
            CommandError::InvalidArguments(
                "no snapshot file is open; usage: save <path>".to_string(),
            )
        })?,
        [path] => PathBuf::from(*path),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: save [path]".to_string(),
            ))
        }
    };
    context.snapshot_path = Some(path.clone());
    context.persist_records()?;
    output::success(format!(
        "Saved {} records to {}.",
        context.session.snapshot().record_count(),
        path.display()
    ));
    context.config.last_snapshot = Some(path);
    context.persist_config()
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let uid = context.session.user().uid.clone();
    let today = context.today();
    let (kind, id, label) = match args {
        ["expense", amount, description, rest @ ..] if rest.len() <= 2 => {
            let category = rest.first().copied().unwrap_or(DEFAULT_EXPENSE_CATEGORY);
            let date = match rest.get(1) {
                Some(raw) => parse_date_arg(raw)?,
                None => today,
            };
            let mut expense = Expense::new(
                parse_amount_arg(amount)?,
                required_text(description, "description")?,
                category.trim(),
                date,
            );
            expense.user_id = Some(uid);
            expense.created_at = Some(Utc::now());
            let (id, label) = (expense.id.clone(), expense.display_label());
            context.store.add_expense(expense);
            ("expense", id, label)
        }
        ["income", amount, source, rest @ ..] if rest.len() <= 1 => {
            let date = match rest.first() {
                Some(raw) => parse_date_arg(raw)?,
                None => today,
            };
            let mut income = Income::new(
                parse_amount_arg(amount)?,
                required_text(source, "source")?,
                date,
            );
            income.user_id = Some(uid);
            income.created_at = Some(Utc::now());
            let (id, label) = (income.id.clone(), income.display_label());
            context.store.add_income(income);
            ("income", id, label)
        }
        ["bill", name, amount, due, flags @ ..] => {
            let mut bill = Bill::new(
                required_text(name, "name")?,
                parse_amount_arg(amount)?,
                parse_date_arg(due)?,
            );
            for flag in flags {
                match *flag {
                    "--recurring" => bill.recurring = true,
                    "--reminder" => bill.reminder_enabled = true,
                    other => {
                        return Err(CommandError::InvalidArguments(format!(
                            "unknown bill option `{other}`"
                        )))
                    }
                }
            }
            bill.user_id = Some(uid);
            bill.created_at = Some(Utc::now());
            let (id, label) = (bill.id.clone(), bill.display_label());
            context.store.add_bill(bill);
            ("bill", id, label)
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: add expense|income|bill ... (see `help add`)".to_string(),
            ))
        }
    };
    output::success(format!("Added {kind} {label} #{id}."));
    context.persist_records()
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let ["expense", id, field, value @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: edit expense <id> <field> <value>".to_string(),
        ));
    };
    let value = value.join(" ");
    let field = field.to_lowercase();
    let change: Box<dyn FnOnce(&mut Expense)> = match field.as_str() {
        "amount" => {
            let amount = parse_amount_arg(&value)?;
            Box::new(move |expense| expense.amount = amount)
        }
        "description" => {
            let description = required_text(&value, "description")?;
            Box::new(move |expense| expense.description = description)
        }
        "category" => {
            let category = value.trim().to_string();
            Box::new(move |expense| expense.category = category)
        }
        "date" => {
            let date = parse_date_arg(value.trim())?;
            Box::new(move |expense| expense.date = date)
        }
        "notes" => {
            let notes = Some(value.trim().to_string()).filter(|notes| !notes.is_empty());
            Box::new(move |expense| expense.notes = notes)
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "cannot edit `{other}`; expected amount, description, category, date or notes"
            )))
        }
    };
    let expense = context.store.update_expense(id, change)?;
    output::success(format!("Updated expense {}.", expense.display_label()));
    context.persist_records()
}

fn cmd_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (id, paid_on) = match args {
        [id] => (*id, context.today()),
        [id, raw] => (*id, parse_date_arg(raw)?),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: pay <bill-id> [YYYY-MM-DD]".to_string(),
            ))
        }
    };
    let bill = context.store.mark_bill_paid(id, paid_on)?;
    output::success(format!(
        "Marked {} as paid on {}.",
        bill.display_label(),
        format_date(paid_on)
    ));
    context.persist_records()
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: delete <expense|income|bill> <id>".to_string(),
        ));
    };
    let label = match kind.to_lowercase().as_str() {
        "expense" => context.store.delete_expense(id)?.display_label(),
        "income" => context.store.delete_income(id)?.display_label(),
        "bill" => context.store.delete_bill(id)?.display_label(),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "cannot delete `{other}`; expected expense, income or bill"
            )))
        }
    };
    output::success(format!("Deleted {kind} {label}."));
    context.persist_records()
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dashboard = context.session.dashboard();
    let due_soon_days = context.session.settings().due_soon_days;
    let mut lines = render::dashboard_lines(&dashboard, due_soon_days, &context.formatter);
    output::section(lines.remove(0));
    print_lines(lines);
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let period = match args.first() {
        None => ReportPeriod::default(),
        Some(raw) => ReportPeriod::parse(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "unknown period `{raw}`; expected `month` or `year`"
            ))
        })?,
    };
    let report = context.session.report(period);
    let mut lines = render::report_lines(&report, &context.formatter);
    output::section(lines.remove(0));
    print_lines(lines);
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let months = match args.first() {
        None => context.session.settings().trend_months,
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a number of months"))
        })?,
    };
    let trend = context.session.trend(months)?;
    output::section(format!("Trend for the last {months} month(s)"));
    print_lines(render::trend_lines(&trend, &context.formatter));
    Ok(())
}

fn cmd_bills(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let sorted = match args {
        [] => false,
        ["--sorted"] => true,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: bills [--sorted]".to_string(),
            ))
        }
    };
    let today = context.today();
    let due_soon_days = context.session.settings().due_soon_days;
    let horizon = context.session.settings().bill_horizon_days;

    // Bills due today are overdue and listed only in that section.
    output::section(format!("Bills due in the next {horizon} days"));
    let upcoming: Vec<(Bill, BillStatus)> = context
        .session
        .upcoming_bills(sorted)
        .into_iter()
        .map(|bill| {
            let status = BillService::status(&bill, today, due_soon_days);
            (bill, status)
        })
        .filter(|(_, status)| !status.is_overdue())
        .collect();
    if upcoming.is_empty() {
        output::line("  No bills due soon.");
    }
    for (bill, status) in &upcoming {
        output::line(render::bill_line(bill, status, today, &context.formatter));
    }

    let overdue = context.session.overdue_bills();
    if !overdue.is_empty() {
        output::section("Overdue");
        for bill in &overdue {
            let status = BillService::status(bill, today, due_soon_days);
            output::line(render::bill_line(bill, &status, today, &context.formatter));
        }
    }

    let outstanding = BillService::total_outstanding(&context.session.snapshot().bills);
    output::line(format!(
        "Outstanding: {}",
        context.formatter.format_amount(outstanding)
    ));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dashboard = context.session.dashboard();
    output::section(format!(
        "Categories for {}",
        render::month_title(dashboard.reference)
    ));
    print_lines(render::category_lines(&dashboard.categories, &context.formatter));
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((kind, terms)) = args.split_first().filter(|(_, terms)| !terms.is_empty()) else {
        return Err(CommandError::InvalidArguments(
            "usage: search <expenses|income|bills> <query>".to_string(),
        ));
    };
    let query = terms.join(" ");
    let lines: Vec<String> = match kind.to_lowercase().as_str() {
        "expenses" | "expense" => context
            .session
            .search_expenses(&query)
            .iter()
            .map(|expense| render::expense_line(expense, &context.formatter))
            .collect(),
        "income" => context
            .session
            .search_income(&query)
            .iter()
            .map(|income| render::income_line(income, &context.formatter))
            .collect(),
        "bills" | "bill" => {
            let today = context.today();
            let due_soon_days = context.session.settings().due_soon_days;
            context
                .session
                .search_bills(&query)
                .iter()
                .map(|bill| {
                    let status = BillService::status(bill, today, due_soon_days);
                    render::bill_line(bill, &status, today, &context.formatter)
                })
                .collect()
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "cannot search `{other}`; expected expenses, income or bills"
            )))
        }
    };
    output::section(format!("{} match(es) for \"{query}\"", lines.len()));
    print_lines(lines);
    Ok(())
}

fn cmd_reminders(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let reminders = context.session.pending_reminders(&context.formatter);
    output::section("Scheduled reminders");
    print_lines(reminders.iter().map(render::reminder_line).collect());
    Ok(())
}

fn cmd_check(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let warnings = context.session.warnings();
    if warnings.is_empty() {
        output::success("No issues found.");
    }
    for warning in warnings {
        output::warning(warning);
    }
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            for key in CONFIG_KEYS {
                output::line(format!("  {key:<22} {}", context.config.get(key)?));
            }
            output::line(format!(
                "  {:<22} {}",
                "file",
                context.config_manager.config_path().display()
            ));
        }
        [key] => output::line(format!("{key} = {}", context.config.get(key)?)),
        [key, value] => {
            let mut config = context.config.clone();
            config.set(key, value)?;
            context.apply_config(config);
            context.persist_config()?;
            output::success(format!("{key} set to {}.", context.config.get(key)?));
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: config [key] [value]".to_string(),
            ))
        }
    }
    Ok(())
}

fn cmd_today(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {}
        ["reset"] => context.pin_today(None),
        [raw] => {
            let date = parse_date_arg(raw)?;
            context.pin_today(Some(date));
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: today [YYYY-MM-DD|reset]".to_string(),
            ))
        }
    }
    output::info(format!("Today is {}.", format_date(context.today())));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
