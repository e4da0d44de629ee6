//! Line-oriented console
//!
//! Parses commands typed at the prompt, runs them against a [`Dashboard`]
//! and renders the resulting state as plain text.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::Utc;
use sales_client::{Facet, HttpClient, Sale, SortField, SortOrder};

use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use crate::state::DashboardState;

pub const HELP: &str = "\
commands:
  show                          redraw the dashboard
  search [text]                 set the search text (empty clears it)
  toggle <facet> <value>        add/remove a facet value (region, gender, category)
  only <facet> <value>          select exactly one value
  clear <facet>                 remove all values of a facet
  options                       list the values each facet offers
  sort <field>                  date, amount, quantity, name
  order [asc|desc]              set or flip the sort direction
  page <n> | next | prev        move between pages
  add <name> <phone> <product> <qty> <amount>
                                create a sale (other fields from the template)
  predict <qty>                 forecast revenue for a quantity
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Search(String),
    Toggle(Facet, String),
    Only(Facet, String),
    Clear(Facet),
    Options,
    Sort(SortField),
    Order(Option<SortOrder>),
    Page(u32),
    Next,
    Prev,
    Add {
        name: String,
        phone: String,
        product: String,
        quantity: u32,
        amount: f64,
    },
    Predict(u32),
    Help,
    Quit,
}

fn invalid(msg: impl Into<String>) -> DashboardError {
    DashboardError::Command(msg.into())
}

fn parse_number<T: FromStr>(value: Option<&str>, what: &str) -> Result<T, DashboardError> {
    value
        .ok_or_else(|| invalid(format!("missing {}", what)))?
        .parse()
        .map_err(|_| invalid(format!("{} must be a number", what)))
}

impl FromStr for Command {
    type Err = DashboardError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();

        let facet_and_value = |rest: &str| -> Result<(Facet, String), DashboardError> {
            let (facet, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| invalid("expected <facet> <value>"))?;
            Ok((facet.parse()?, value.trim().to_string()))
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "" | "show" => Command::Show,
            "search" => Command::Search(rest.to_string()),
            "toggle" => {
                let (facet, value) = facet_and_value(rest)?;
                Command::Toggle(facet, value)
            }
            "only" => {
                let (facet, value) = facet_and_value(rest)?;
                Command::Only(facet, value)
            }
            "clear" => Command::Clear(
                args.next()
                    .ok_or_else(|| invalid("expected <facet>"))?
                    .parse()?,
            ),
            "options" => Command::Options,
            "sort" => Command::Sort(
                args.next()
                    .ok_or_else(|| invalid("expected <field>"))?
                    .parse()?,
            ),
            "order" => Command::Order(args.next().map(str::parse).transpose()?),
            "page" => Command::Page(parse_number(args.next(), "page")?),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "add" => {
                let name = args.next().ok_or_else(|| invalid("missing name"))?.to_string();
                let phone = args.next().ok_or_else(|| invalid("missing phone"))?.to_string();
                let product = args.next().ok_or_else(|| invalid("missing product"))?.to_string();
                let quantity = parse_number(args.next(), "quantity")?;
                let amount = parse_number(args.next(), "amount")?;
                Command::Add {
                    name,
                    phone,
                    product,
                    quantity,
                    amount,
                }
            }
            "predict" => Command::Predict(parse_number(args.next(), "quantity")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(invalid(format!("unknown command '{}'", other))),
        };
        Ok(cmd)
    }
}

/// Run `cmd` and return the text to print
pub async fn execute<C: HttpClient>(dashboard: &Dashboard<C>, cmd: Command) -> String {
    match cmd {
        Command::Show => {}
        Command::Search(text) => dashboard.set_search_text(text).await,
        Command::Toggle(facet, value) => dashboard.toggle_facet(facet, value).await,
        Command::Only(facet, value) => dashboard.select_only(facet, value).await,
        Command::Clear(facet) => dashboard.clear_facet(facet).await,
        Command::Options => return render_options(),
        Command::Sort(field) => dashboard.set_sort_field(field).await,
        Command::Order(Some(order)) => dashboard.set_sort_direction(order).await,
        Command::Order(None) => dashboard.toggle_sort_direction().await,
        Command::Page(n) => dashboard.go_to_page(n).await,
        Command::Next => dashboard.next_page().await,
        Command::Prev => dashboard.prev_page().await,
        Command::Add {
            name,
            phone,
            product,
            quantity,
            amount,
        } => {
            let mut sale = Sale::template(Utc::now());
            sale.customer_name = name;
            sale.phone_number = phone;
            sale.product_name = product;
            sale.quantity = quantity;
            sale.total_amount = amount;

            let note = match dashboard.create_sale(&sale).await {
                Some(created) => format!(
                    "created {}\n",
                    created.display_id().unwrap_or_else(|| "sale".to_string())
                ),
                None => "create returned no record; it may not have been saved\n".to_string(),
            };
            return note + &render(&dashboard.snapshot().await);
        }
        Command::Predict(quantity) => {
            let revenue = dashboard.predict(quantity).await;
            return format!("predicted revenue for {} units: ${:.2}", quantity, revenue);
        }
        Command::Help => return HELP.to_string(),
        Command::Quit => return String::new(),
    }
    render(&dashboard.snapshot().await)
}

fn render_options() -> String {
    Facet::ALL
        .iter()
        .map(|f| format!("{:<9} {}", f.param(), f.options().join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_facet(state: &DashboardState, facet: Facet) -> String {
    let set = state.query.filters().facets.get(facet);
    if set.is_empty() {
        "all".to_string()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join("|")
    }
}

/// Render the dashboard as text
pub fn render(state: &DashboardState) -> String {
    let filters = state.query.filters();
    let pagination = state.query.pagination();
    let mut out = String::new();

    let search = if filters.search.is_empty() {
        "-"
    } else {
        filters.search.as_str()
    };
    let _ = writeln!(
        out,
        "search: {}  region: {}  gender: {}  category: {}  sort: {} {}",
        search,
        describe_facet(state, Facet::Region),
        describe_facet(state, Facet::Gender),
        describe_facet(state, Facet::Category),
        filters.sort_by,
        filters.sort_order,
    );

    let stats = &state.stats;
    let _ = writeln!(
        out,
        "orders: {}  revenue: ${:.2}  avg order: ${:.2}",
        stats.total_orders, stats.total_revenue, stats.avg_order_value
    );
    if let Some(err) = &state.stats_error {
        let _ = writeln!(out, "(stats unavailable: {})", err);
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<9} {:<10} {:<18} {:<12} {:<7} {:<12} {:>4} {:>12} {:<6}",
        "ID", "Date", "Customer", "Phone", "Gender", "Category", "Qty", "Total", "Region"
    );

    if state.loading {
        out.push_str("Loading data...\n");
    } else if state.sales.is_empty() {
        out.push_str("No records found.\n");
        if let Some(err) = &state.list_error {
            let _ = writeln!(out, "(last fetch failed: {})", err);
        }
    } else {
        for sale in &state.sales {
            let _ = writeln!(
                out,
                "{:<9} {:<10} {:<18} {:<12} {:<7} {:<12} {:>4} {:>12.2} {:<6}",
                sale.display_id().unwrap_or_default(),
                sale.date.format("%Y-%m-%d"),
                truncate(&sale.customer_name, 18),
                truncate(&sale.phone_number, 12),
                sale.gender,
                truncate(&sale.category, 12),
                sale.quantity,
                sale.total_amount,
                sale.region,
            );
        }
    }

    let _ = write!(
        out,
        "\nPage {} of {} ({} records)",
        pagination.page, pagination.pages, pagination.total
    );
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}
