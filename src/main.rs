use clap::Parser;
use ilp_connector::application::account::AccountMiddleware;
use ilp_connector::application::context::{ConnectorServices, PacketContext, PacketState};
use ilp_connector::application::middleware::MiddlewareChain;
use ilp_connector::domain::account::Account;
use ilp_connector::error::ConnectorError;
use ilp_connector::infrastructure::in_memory::InMemoryLedger;
use ilp_connector::interfaces::csv::{OutcomeWriter, PacketOutcome, PacketReader, PacketRecord};
use ilp_connector::interfaces::json::DirectorySnapshot;
use ilp_connector::telemetry;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Packets CSV file to replay
    packets: PathBuf,

    /// JSON snapshot of peers, incoming payments and wallet addresses
    #[arg(long)]
    directory: PathBuf,

    /// This connector's own ILP address
    #[arg(long, env = "ILP_ADDRESS")]
    ilp_address: String,

    /// Maximum number of packets in flight
    #[arg(long, default_value_t = 64)]
    concurrency: usize,
}

/// Runs one packet through the chain, standing in for the auth and STREAM
/// stages by taking the caller and stream destination from the record.
async fn route_packet(
    chain: Arc<MiddlewareChain>,
    services: ConnectorServices,
    packet: usize,
    record: PacketRecord,
) -> PacketOutcome {
    let incoming_account = match record.caller.as_deref() {
        Some(caller) => match services.peers.get(caller).await {
            Ok(peer) => peer.map(Account::from),
            Err(err) => return PacketOutcome::rejected(packet, &err),
        },
        None => None,
    };
    let prepare = record.prepare();
    let state = PacketState {
        incoming_account,
        stream_destination: record.stream_destination,
    };
    let mut ctx = PacketContext::new(services, prepare).with_state(state);

    match chain.run(&mut ctx).await {
        Ok(()) => match ctx.accounts() {
            Some(accounts) => PacketOutcome::routed(packet, accounts),
            None => PacketOutcome::rejected(packet, &ConnectorError::AccountsNotResolved),
        },
        Err(err) => PacketOutcome::rejected(packet, &err),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let directory = File::open(&cli.directory).into_diagnostic()?;
    let snapshot = DirectorySnapshot::from_reader(directory).into_diagnostic()?;
    let ledger = InMemoryLedger::new();
    let services = snapshot.into_services(Arc::new(ledger.clone())).await;

    let chain = Arc::new(MiddlewareChain::new().with(AccountMiddleware::new(cli.ilp_address)));
    let permits = Arc::new(Semaphore::new(cli.concurrency.max(1)));
    let mut tasks = JoinSet::new();

    let file = File::open(&cli.packets).into_diagnostic()?;
    let reader = PacketReader::new(file);
    for (index, record) in reader.packets().enumerate() {
        let packet = index + 1;
        match record {
            Ok(record) => {
                let permit = permits.clone().acquire_owned().await.into_diagnostic()?;
                let chain = chain.clone();
                let services = services.clone();
                tasks.spawn(async move {
                    let outcome = route_packet(chain, services, packet, record).await;
                    drop(permit);
                    outcome
                });
            }
            Err(e) => {
                error!(packet, error = %e, "Error reading packet");
            }
        }
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.into_diagnostic()?);
    }
    outcomes.sort_by_key(|outcome| outcome.packet);
    info!(
        packets = outcomes.len(),
        liquidity_accounts = ledger.len().await,
        "Replay finished"
    );

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());
    writer.write_outcomes(outcomes).into_diagnostic()?;

    Ok(())
}
