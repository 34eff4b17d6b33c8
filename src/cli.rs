use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, instrument};

use marketplace_admin::app_system::{AdminSystem, AppConfig};
use marketplace_admin::controller::{filter_local, ListHandle, ListSource, ListState, Searchable};
use marketplace_admin::domain::{
    CancelOrder, FeeCreate, FeePatch, MaterialCreate, MaterialPatch, OrderStatus, OrderStatusUpdate, Role, TaxUpdate,
    UserStatus, UserStatusUpdate, VendorStatus, VendorStatusUpdate, DEFAULT_PAGE_LIMIT,
};
use marketplace_admin::http::{Filters, ListQuery};
use marketplace_admin::pages::{self, fees, materials, orders, tax, users, vendors};
use marketplace_admin::services::{FeeRowAction, MaterialRowAction, OrderRowAction, UserRowAction, VendorRowAction};
use marketplace_admin::session::{FileSessionStore, Session, SessionUser};
use marketplace_admin::ui::{FilterBar, Modal, Table};
use marketplace_admin::variant::VariantSwitcher;

#[derive(Parser, Debug)]
#[command(author, version, about = "Admin back-office for the marketplace API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Remote(RemoteCommand),
    /// Sign in with an issued token, inspect or clear the stored session.
    #[command(subcommand)]
    Session(SessionCommand),
    /// Switch the prebuilt UI variant a component path links to.
    Variant {
        #[arg(long, env = "VARIANTS_DIR", default_value = "variants")]
        variants_dir: PathBuf,
        #[arg(long, env = "VARIANT_LINK", default_value = "src/components/Admin")]
        link: PathBuf,
        #[command(subcommand)]
        command: VariantCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum RemoteCommand {
    #[command(subcommand)]
    Orders(OrdersCommand),
    #[command(subcommand)]
    Fees(FeesCommand),
    #[command(subcommand)]
    Materials(MaterialsCommand),
    #[command(subcommand)]
    Vendors(VendorsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Tax(TaxCommand),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    limit: u32,
    /// Server-side filter, e.g. `--filter status=SHIPPED`. Repeatable.
    #[arg(long = "filter", value_parser = parse_key_val)]
    filters: Vec<(String, String)>,
    /// Narrow the loaded page locally (case-insensitive substring).
    #[arg(long)]
    find: Option<String>,
    /// Show the detail row for this id. Repeatable.
    #[arg(long)]
    expand: Vec<String>,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self { page: 1, limit: DEFAULT_PAGE_LIMIT, filters: Vec::new(), find: None, expand: Vec::new() }
    }
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    List(ListArgs),
    Show { id: String },
    Cancel {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Status {
        id: String,
        status: OrderStatus,
        #[arg(long)]
        note: Option<String>,
    },
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum FeesCommand {
    List(ListArgs),
    Show { id: String },
    /// Fields as `key=value`, e.g. `--field level=GLOBAL --field feeValue=5`.
    Create {
        #[arg(long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },
    Update {
        id: String,
        #[arg(long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },
    Delete { id: String },
    Toggle { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MaterialsCommand {
    List(ListArgs),
    Show { id: String },
    Create {
        #[arg(long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },
    Update {
        id: String,
        #[arg(long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },
    Delete { id: String },
    Toggle { id: String },
}

#[derive(Subcommand, Debug)]
pub enum VendorsCommand {
    List(ListArgs),
    Show { id: String },
    Status {
        id: String,
        status: VendorStatus,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List(ListArgs),
    Show { id: String },
    Status { id: String, status: UserStatus },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TaxCommand {
    Show,
    Update {
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        description: Option<String>,
    },
    History(ListArgs),
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    Show,
    Login {
        #[arg(long, env = "ADMIN_TOKEN")]
        token: String,
        #[arg(long)]
        role: Role,
        #[arg(long)]
        email: Option<String>,
    },
    Logout,
}

#[derive(Subcommand, Debug)]
pub enum VariantCommand {
    List,
    Check,
    Switch { name: String },
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    Ok((key.trim().to_string(), value.to_string()))
}

pub async fn execute(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let store = FileSessionStore::new(&config.session_file);
    match cli.command {
        Command::Session(command) => session_command(command, &store),
        Command::Variant { variants_dir, link, command } => {
            variant_command(VariantSwitcher::new(variants_dir, link), command)
        }
        Command::Remote(command) => {
            let session = store
                .load()
                .with_context(|| format!("loading session from {}", store.path().display()))?;
            let mut system = AdminSystem::connect(&config, session)?;
            let result = remote_command(&mut system, command).await;
            system.shutdown().await?;
            result
        }
    }
}

#[instrument(skip(system))]
async fn remote_command(system: &mut AdminSystem, command: RemoteCommand) -> anyhow::Result<()> {
    match command {
        RemoteCommand::Orders(command) => orders_command(system, command).await,
        RemoteCommand::Fees(command) => fees_command(system, command).await,
        RemoteCommand::Materials(command) => materials_command(system, command).await,
        RemoteCommand::Vendors(command) => vendors_command(system, command).await,
        RemoteCommand::Users(command) => users_command(system, command).await,
        RemoteCommand::Tax(command) => tax_command(system, command).await,
    }
}

/// One list page as the CLI shows it.
struct PageView<T> {
    title: &'static str,
    filters: FilterBar,
    table: Table<T>,
}

impl<T: Serialize + Clone + Searchable> PageView<T> {
    fn new(title: &'static str, filters: FilterBar, table: Table<T>) -> Self {
        Self { title, filters, table }
    }

    fn open<S>(&mut self, system: &mut AdminSystem, source: S, args: &ListArgs) -> anyhow::Result<ListHandle<T, S::Action>>
    where
        S: ListSource<Item = T>,
    {
        let mut filters = Filters::new();
        for (key, value) in &args.filters {
            let (key, value) = self.filters.change(key, value)?;
            filters.set(key, value);
        }
        for id in &args.expand {
            self.table.toggle_expanded(id);
        }
        Ok(system.open_list(source, ListQuery::new(args.page, args.limit).with_filters(filters)))
    }

    fn print(&mut self, mut state: ListState<T>, find: Option<&str>) {
        self.filters.sync(&state.filters);
        if let Some(needle) = find {
            state.items = filter_local(&state.items, needle).into_iter().cloned().collect();
        }
        println!("{}", pages::render_list_page(self.title, &self.filters, &self.table, &state));
    }

    async fn list<S>(mut self, system: &mut AdminSystem, source: S, args: ListArgs) -> anyhow::Result<()>
    where
        S: ListSource<Item = T>,
    {
        let handle = self.open(system, source, &args)?;
        let state = handle.settled().await?;
        self.print(state, args.find.as_deref());
        Ok(())
    }

    /// Loads the page, runs the row action, then shows the re-fetched page.
    async fn act<S>(mut self, system: &mut AdminSystem, source: S, action: S::Action) -> anyhow::Result<()>
    where
        S: ListSource<Item = T>,
    {
        let handle = self.open(system, source, &ListArgs::default())?;
        handle.settled().await?;
        let outcome = handle.run_action(action).await;
        let state = handle.settled().await?;
        self.print(state, None);
        outcome?;
        info!("Action applied");
        Ok(())
    }
}

fn fill(modal: &mut Modal, fields: &[(String, String)]) -> anyhow::Result<()> {
    modal.open();
    for (key, value) in fields {
        modal.form.set(key, value.as_str())?;
    }
    Ok(())
}

/// Fills a dialog from command-line values and decodes its payload.
fn dialog<P: DeserializeOwned>(mut modal: Modal, values: Vec<(&str, Option<String>)>) -> anyhow::Result<P> {
    let fields: Vec<(String, String)> = values
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
        .collect();
    fill(&mut modal, &fields)?;
    Ok(modal.form.payload()?)
}

async fn orders_command(system: &mut AdminSystem, command: OrdersCommand) -> anyhow::Result<()> {
    let view = PageView::new("Orders", orders::order_filters(), orders::order_table());
    let source = system.orders.clone();
    match command {
        OrdersCommand::List(args) => view.list(system, source, args).await,
        OrdersCommand::Show { id } => {
            let order = system.orders.get_order(&id).await?;
            println!("{}", orders::order_detail(&order));
            Ok(())
        }
        OrdersCommand::Cancel { id, reason } => {
            let CancelOrder { reason } = dialog(orders::cancel_modal(), vec![("reason", reason)])?;
            view.act(system, source, OrderRowAction::Cancel { id, reason }).await
        }
        OrdersCommand::Status { id, status, note } => {
            let OrderStatusUpdate { status, note } = dialog(
                orders::status_modal(),
                vec![("status", Some(status.to_string())), ("note", note)],
            )?;
            view.act(system, source, OrderRowAction::UpdateStatus { id, status, note }).await
        }
        OrdersCommand::Stats => {
            let stats = system.orders.order_stats().await?;
            println!("{}", orders::order_stats_summary(&stats));
            Ok(())
        }
    }
}

async fn fees_command(system: &mut AdminSystem, command: FeesCommand) -> anyhow::Result<()> {
    let view = PageView::new("Platform fees", fees::fee_filters(), fees::fee_table());
    let source = system.fees.clone();
    match command {
        FeesCommand::List(args) => view.list(system, source, args).await,
        FeesCommand::Show { id } => {
            let fee = system.fees.get_fee(&id).await?;
            let mut table = fees::fee_table();
            table.toggle_expanded(&fee.id);
            println!("{}", table.render(&[fee]));
            Ok(())
        }
        FeesCommand::Create { fields } => {
            let mut modal = fees::create_fee_modal();
            fill(&mut modal, &fields)?;
            let created = modal
                .submit(move |payload: FeeCreate| async move { source.create_checked_fee(&payload).await })
                .await
                .inspect_err(|_| eprintln!("{}", modal.render()))?;
            match created {
                Some(fee) => println!("Created fee {} ({})", fee.id, fee.display_value()),
                None => println!("Fee created"),
            }
            Ok(())
        }
        FeesCommand::Update { id, fields } => {
            let current = system.fees.get_fee(&id).await?;
            let mut modal = fees::edit_fee_modal(&current);
            fill(&mut modal, &fields)?;
            let patch: FeePatch = modal.form.payload()?;
            view.act(system, source, FeeRowAction::Update { id, patch }).await
        }
        FeesCommand::Delete { id } => view.act(system, source, FeeRowAction::Delete(id)).await,
        FeesCommand::Toggle { id } => view.act(system, source, FeeRowAction::Toggle(id)).await,
    }
}

async fn materials_command(system: &mut AdminSystem, command: MaterialsCommand) -> anyhow::Result<()> {
    let view = PageView::new("Materials", materials::material_filters(), materials::material_table());
    let source = system.materials.clone();
    match command {
        MaterialsCommand::List(args) => view.list(system, source, args).await,
        MaterialsCommand::Show { id } => {
            let material = system.materials.get_material(&id).await?;
            let mut table = materials::material_table();
            table.toggle_expanded(&material.id);
            println!("{}", table.render(&[material]));
            Ok(())
        }
        MaterialsCommand::Create { fields } => {
            let mut modal = materials::create_material_modal();
            fill(&mut modal, &fields)?;
            let created = modal
                .submit(move |payload: MaterialCreate| async move { source.create_checked_material(&payload).await })
                .await
                .inspect_err(|_| eprintln!("{}", modal.render()))?;
            match created {
                Some(material) => println!("Created material {} ({})", material.id, material.name),
                None => println!("Material created"),
            }
            Ok(())
        }
        MaterialsCommand::Update { id, fields } => {
            let current = system.materials.get_material(&id).await?;
            let mut modal = materials::edit_material_modal(&current);
            fill(&mut modal, &fields)?;
            let patch: MaterialPatch = modal.form.payload()?;
            view.act(system, source, MaterialRowAction::Update { id, patch }).await
        }
        MaterialsCommand::Delete { id } => view.act(system, source, MaterialRowAction::Delete(id)).await,
        MaterialsCommand::Toggle { id } => view.act(system, source, MaterialRowAction::Toggle(id)).await,
    }
}

async fn vendors_command(system: &mut AdminSystem, command: VendorsCommand) -> anyhow::Result<()> {
    let view = PageView::new("Vendors", vendors::vendor_filters(), vendors::vendor_table());
    let source = system.vendors.clone();
    match command {
        VendorsCommand::List(args) => view.list(system, source, args).await,
        VendorsCommand::Show { id } => {
            let vendor = system.vendors.get_vendor(&id).await?;
            let mut table = vendors::vendor_table();
            table.toggle_expanded(&vendor.id);
            println!("{}", table.render(&[vendor]));
            Ok(())
        }
        VendorsCommand::Status { id, status, reason } => {
            let VendorStatusUpdate { status, reason } = dialog(
                vendors::status_modal(),
                vec![("status", Some(status.to_string())), ("reason", reason)],
            )?;
            view.act(system, source, VendorRowAction::UpdateStatus { id, status, reason }).await
        }
    }
}

async fn users_command(system: &mut AdminSystem, command: UsersCommand) -> anyhow::Result<()> {
    let view = PageView::new("Users", users::user_filters(), users::user_table());
    let source = system.users.clone();
    match command {
        UsersCommand::List(args) => view.list(system, source, args).await,
        UsersCommand::Show { id } => {
            let user = system.users.get_user(&id).await?;
            println!("{}", users::user_table().render(&[user]));
            Ok(())
        }
        UsersCommand::Status { id, status } => {
            let UserStatusUpdate { status } = dialog(users::status_modal(), vec![("status", Some(status.to_string()))])?;
            view.act(system, source, UserRowAction::UpdateStatus { id, status }).await
        }
        UsersCommand::Delete { id } => view.act(system, source, UserRowAction::Delete(id)).await,
    }
}

async fn tax_command(system: &mut AdminSystem, command: TaxCommand) -> anyhow::Result<()> {
    let view = PageView::new("Tax history", FilterBar::new(Vec::new()), tax::history_table());
    let source = system.tax.clone();
    match command {
        TaxCommand::Show => {
            let current = system.tax.current_tax().await?;
            println!("{}", tax::tax_summary(&current));
            Ok(())
        }
        TaxCommand::Update { rate, description } => {
            let current = system.tax.current_tax().await?;
            let update: TaxUpdate = dialog(
                tax::update_tax_modal(Some(&current)),
                vec![("taxRate", Some(rate.to_string())), ("description", description)],
            )?;
            view.act(system, source, update).await
        }
        TaxCommand::History(args) => view.list(system, source, args).await,
    }
}

fn session_command(command: SessionCommand, store: &FileSessionStore) -> anyhow::Result<()> {
    match command {
        SessionCommand::Show => {
            let session = store.load()?;
            match (session.bearer_token(), session.role()) {
                (Some(token), role) => {
                    let role = role.map(|r| r.to_string()).unwrap_or_else(|| "no role".to_string());
                    let email = session.user.as_ref().and_then(|u| u.email.as_deref()).unwrap_or("-");
                    println!("Signed in as {role} ({email}), token {}", mask(token));
                    if let Err(e) = session.require_admin() {
                        println!("! {e}");
                    }
                }
                (None, _) => println!("Signed out"),
            }
            Ok(())
        }
        SessionCommand::Login { token, role, email } => {
            let session = Session {
                token: Some(token),
                user: Some(SessionUser { id: None, role, email }),
                guest_session_token: None,
            };
            store.save(&session)?;
            println!("Session saved to {}", store.path().display());
            Ok(())
        }
        SessionCommand::Logout => {
            store.clear()?;
            println!("Signed out");
            Ok(())
        }
    }
}

fn mask(token: &str) -> String {
    let tail: String = token.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("...{tail}")
}

fn variant_command(switcher: VariantSwitcher, command: VariantCommand) -> anyhow::Result<()> {
    match command {
        VariantCommand::List => {
            for name in switcher.available()? {
                println!("{name}");
            }
        }
        VariantCommand::Check => {
            println!("{}: {}", switcher.link().display(), switcher.check()?);
        }
        VariantCommand::Switch { name } => {
            let outcome = switcher.switch(&name)?;
            if let Some(backup) = &outcome.backup {
                println!("Moved existing directory to {}", backup.display());
            }
            println!("{} now links to variant {} (was {})", switcher.link().display(), outcome.variant, outcome.previous);
        }
    }
    Ok(())
}
