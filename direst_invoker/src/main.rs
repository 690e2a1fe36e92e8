use anyhow::Result;
use clap::Parser;
use direst_invoker::{
    cli::{
        commands::{Cli, Commands, IFinDCommand, WindCommand},
        params::{parse_codes, parse_date_arg, resolve_config, table_to_json},
    },
    providers::{IFinDInvoker, WindInvoker},
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.url.as_deref(), cli.max_batch_size)?;

    let output = match cli.command {
        Commands::Wind(command) => run_wind(WindInvoker::new(config)?, command).await?,
        Commands::Ifind(command) => run_ifind(IFinDInvoker::new(config)?, command).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_wind(wind: WindInvoker, command: WindCommand) -> Result<Value> {
    let table = match command {
        WindCommand::Wset { tablename, options } => wind.wset(&tablename, &options).await?,
        WindCommand::Wss(a) => wind.wss(parse_codes(&a.codes), &a.fields, &a.options).await?,
        WindCommand::Wsq(a) => wind.wsq(parse_codes(&a.codes), &a.fields, &a.options).await?,
        WindCommand::Wsd(a) => {
            wind.wsd(
                parse_codes(&a.codes),
                &a.fields,
                parse_date_arg(&a.begin),
                parse_date_arg(&a.end),
                &a.options,
            )
            .await?
        }
        WindCommand::Wsi(a) => {
            wind.wsi(
                parse_codes(&a.codes),
                &a.fields,
                parse_date_arg(&a.begin),
                parse_date_arg(&a.end),
                &a.options,
            )
            .await?
        }
        WindCommand::Wst(a) => {
            wind.wst(
                parse_codes(&a.codes),
                &a.fields,
                parse_date_arg(&a.begin),
                parse_date_arg(&a.end),
                &a.options,
            )
            .await?
        }
        WindCommand::Edb {
            codes,
            begin,
            end,
            options,
        } => {
            wind.edb(
                parse_codes(&codes),
                parse_date_arg(&begin),
                parse_date_arg(&end),
                &options,
            )
            .await?
        }
        WindCommand::Tdaysoffset {
            offset,
            begin,
            options,
        } => {
            let date = wind
                .tdaysoffset(offset, parse_date_arg(&begin), &options)
                .await?;
            return Ok(date.map(Value::String).unwrap_or(Value::Null));
        }
        WindCommand::Tdays {
            begin,
            end,
            options,
        } => {
            let days = wind
                .tdays(parse_date_arg(&begin), parse_date_arg(&end), &options)
                .await?;
            return Ok(days.unwrap_or(Value::Null));
        }
    };
    Ok(table_to_json(table.as_ref()))
}

async fn run_ifind(ifind: IFinDInvoker, command: IFinDCommand) -> Result<Value> {
    let table = match command {
        IFinDCommand::DateSerial {
            args,
            global_params,
        } => {
            ifind
                .ths_date_serial(
                    parse_codes(&args.codes),
                    &args.indicators,
                    &args.params,
                    &global_params,
                    parse_date_arg(&args.begin),
                    parse_date_arg(&args.end),
                )
                .await?
        }
        IFinDCommand::HighFrequence(a) => {
            ifind
                .ths_high_frequence_sequence(
                    parse_codes(&a.codes),
                    &a.indicators,
                    &a.params,
                    parse_date_arg(&a.begin),
                    parse_date_arg(&a.end),
                )
                .await?
        }
        IFinDCommand::RealtimeQuotes {
            codes,
            indicators,
            params,
        } => {
            ifind
                .ths_realtime_quotes(parse_codes(&codes), &indicators, &params)
                .await?
        }
        IFinDCommand::HistoryQuotes(a) => {
            ifind
                .ths_history_quotes(
                    parse_codes(&a.codes),
                    &a.indicators,
                    &a.params,
                    parse_date_arg(&a.begin),
                    parse_date_arg(&a.end),
                )
                .await?
        }
        IFinDCommand::Snapshot(a) => {
            ifind
                .ths_snapshot(
                    parse_codes(&a.codes),
                    &a.indicators,
                    &a.params,
                    parse_date_arg(&a.begin),
                    parse_date_arg(&a.end),
                )
                .await?
        }
        IFinDCommand::BasicData {
            codes,
            indicators,
            params,
        } => {
            ifind
                .ths_basic_data(parse_codes(&codes), &indicators, &params)
                .await?
        }
        IFinDCommand::DataPool {
            name,
            params,
            options,
        } => ifind.ths_data_pool(&name, &params, &options).await?,
        IFinDCommand::EdbQuery {
            indicators,
            begin,
            end,
        } => {
            ifind
                .ths_edb_query(
                    parse_codes(&indicators),
                    parse_date_arg(&begin),
                    parse_date_arg(&end),
                )
                .await?
        }
        IFinDCommand::DateQuery {
            exchange,
            params,
            begin,
            end,
        } => {
            ifind
                .ths_date_query(
                    &exchange,
                    &params,
                    parse_date_arg(&begin),
                    parse_date_arg(&end),
                )
                .await?
        }
    };
    Ok(table_to_json(table.as_ref()))
}
