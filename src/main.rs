use chrono::Local;
use circuit_match::{cli, config, error, export, loader, logging};
use circuit_match_common::{extract_all, summarize, RecordFilter, SlaLookup};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Compare {
            compare_file,
            master,
            sheet,
            key_column,
            job_id,
            output,
            excel,
            summary,
            no_header,
        } => {
            println!("🔌 circuit-match - 回線照合\n");

            let mut config = config;
            if let Some(sheet) = sheet {
                config.sheet_name = sheet;
            }
            if let Some(key_column) = key_column {
                config.key_column = key_column;
            }
            let master_path = match master {
                Some(path) => path,
                None => config.master_path()?,
            };

            // 1. マスタ読み込み
            println!("[1/3] マスタを読み込み中...");
            let master = loader::read_master(&master_path, &config.sheet_name, config.header_row)?;
            println!("✔ {}行 ({})\n", master.len(), master_path.display());

            // 2. 比較ファイル読み込み
            println!("[2/3] 比較ファイルを読み込み中...");
            let comparison = loader::read_comparison(&compare_file, !no_header)?;
            println!("✔ {}行 × {}列\n", comparison.len(), comparison.columns().len());

            // 3. 照合
            println!("[3/3] 照合中...");
            let mut outcome =
                circuit_match_common::compare(&master, &comparison, &config.match_options())?;
            let job_id = job_id.unwrap_or_else(|| Local::now().timestamp().max(0) as u64);
            outcome.assign_job(job_id);
            let totals = outcome.summary;
            println!(
                "✔ 一致 {} / 不一致 {} / 合計 {} (ジョブ {})\n",
                totals.matched_total, totals.unmatched_total, totals.total_records, job_id
            );

            let output = output.unwrap_or_else(|| default_report_path(&compare_file));
            export::write_report(&outcome, &output)?;
            println!("✔ 結果を保存: {}", output.display());

            if let Some(excel) = excel {
                let path = export::resolve_output_path(&excel, "results.xlsx");
                export::excel::write_results(&outcome, &path)?;
                println!("✔ 結果Excelを保存: {}", path.display());
            }

            if let Some(summary) = summary {
                let sla = SlaLookup::from_table(&master, &config.project_column, &config.sla_column);
                let rows = summarize(&outcome.results, &sla);
                let file_name = export::summary_file_name(job_id, &Local::now());
                let path = export::resolve_output_path(&summary, &file_name);
                export::excel::write_summary(&rows, &path)?;
                println!("✔ サマリーを保存: {} ({}グループ)", path.display(), rows.len());
            }

            println!("\n✅ 照合完了");
        }

        Commands::Extract { text } => {
            let codes = extract_all(&text);
            if codes.is_empty() {
                println!("回線コードは見つかりませんでした");
            }
            for code in codes {
                println!("{}", code);
            }
        }

        Commands::Records {
            input,
            customer,
            project,
            province,
            status,
            query,
        } => {
            let outcome = export::read_report(&input)?;
            let filter = RecordFilter {
                customer,
                project,
                province,
                status,
                query,
            };
            let selected = filter.apply(&outcome.results);

            for result in &selected {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    result.circuit_norm,
                    result.status(),
                    result.customer,
                    result.project_name,
                    result.province,
                    result.service_category
                );
            }
            println!("\n{} / {}件", selected.len(), outcome.results.len());
        }

        Commands::Config {
            set_key_column,
            set_master,
            show,
        } => {
            let mut config = config;

            if let Some(key_column) = set_key_column {
                config.set_key_column(key_column)?;
                println!("✔ キー列を設定しました");
            }

            if let Some(path) = set_master {
                config.set_master_path(path)?;
                println!("✔ マスタファイルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!(
                    "  マスタ: {}",
                    config
                        .master_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("  シート: {}", config.sheet_name);
                println!("  ヘッダー行: {}", config.header_row);
                println!("  キー列: {}", config.key_column);
                println!("  サービス種別列: {}", config.service_type_columns.join(", "));
                println!("  SLA列: {}", config.sla_column);
            }
        }
    }

    Ok(())
}

/// 比較ファイルと同じ場所の report.json
fn default_report_path(compare_file: &Path) -> PathBuf {
    compare_file
        .parent()
        .map(|p| p.join("report.json"))
        .unwrap_or_else(|| PathBuf::from("report.json"))
}
