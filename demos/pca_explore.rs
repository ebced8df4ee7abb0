//! TOML-based exploration tool for PCA and regression on synthetic data.
//!
//! A dataset is generated from latent factors, reduced with PCA, and one of
//! its columns is regressed on the others with OLS and Lasso.
//!
//! Run with:
//!   cargo run --example pca_explore                          # Uses pca_explore.toml
//!   cargo run --example pca_explore -- --recipe collinear    # Uses embedded recipe
//!   cargo run --example pca_explore -- --config my.toml      # Uses custom file

mod common;

use clap::Parser;
use linstat::{
    EigenConfig, LassoConfig, LassoRegression, LinearRegression, Matrix,
    PrincipalComponentAnalysis, ValueTable, Vector,
};
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::io::Write;

// ============================================================================
// Recipe Constants
// ============================================================================

const RECIPE_TWO_FACTOR: &str = r#"
[data]
samples = 200
seed = 42
noise_amplitude = 0.1
loadings = [[1.0, 0.0], [0.8, 0.2], [0.0, 1.0], [0.3, -0.7]]

[pca]
components = 2

[regression]
target = 1
lasso_complexity = [0.0, 0.01, 0.05]

[output]
csv_path = "output/pca_two_factor.csv"
"#;

const RECIPE_COLLINEAR: &str = r#"
[data]
samples = 150
seed = 7
noise_amplitude = 0.02
loadings = [[1.0], [0.99], [1.01], [0.5]]

[pca]
components = 0

[regression]
target = 3
lasso_complexity = [0.0, 0.001, 0.01]

[output]
csv_path = "output/pca_collinear.csv"
"#;

const RECIPE_SPARSE: &str = r#"
[data]
samples = 300
seed = 3
noise_amplitude = 0.3
loadings = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.9, 0.0, 0.1], [0.2, 0.2, 0.2]]

[pca]
components = 3
max_iterations = 500
tolerance = 1e-12

[regression]
target = 3
lasso_complexity = [0.0, 0.01, 0.05, 0.2]

[output]
csv_path = "output/pca_sparse.csv"
"#;

// ============================================================================
// Configuration Structures
// ============================================================================

#[derive(Deserialize)]
struct ExploreConfig {
    data: DataConfig,
    pca: PcaConfig,
    regression: RegressionConfig,
    output: OutputConfig,
}

#[derive(Deserialize)]
struct DataConfig {
    samples: usize,
    seed: u64,
    noise_amplitude: f64,
    loadings: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct PcaConfig {
    components: usize,
    #[serde(default)]
    max_iterations: Option<usize>,
    #[serde(default)]
    tolerance: Option<f64>,
}

#[derive(Deserialize)]
struct RegressionConfig {
    target: usize,
    lasso_complexity: Vec<f64>,
}

#[derive(Deserialize)]
struct OutputConfig {
    csv_path: String,
}

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recipe name (two_factor, collinear, sparse)
    #[arg(short, long)]
    recipe: Option<String>,

    /// Custom config file path
    #[arg(short, long)]
    config: Option<String>,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("=== linstat PCA Exploration Tool ===\n");

    // Load config (priority: --recipe > --config > pca_explore.toml)
    let config_str = if let Some(recipe_name) = args.recipe {
        println!("Using recipe: {}", recipe_name);
        load_recipe(&recipe_name)?
    } else if let Some(config_path) = args.config {
        println!("Loading config: {}", config_path);
        fs::read_to_string(config_path)?
    } else {
        match fs::read_to_string("pca_explore.toml") {
            Ok(content) => {
                println!("Using pca_explore.toml");
                content
            }
            Err(_) => {
                println!("No pca_explore.toml found, using two_factor recipe");
                RECIPE_TWO_FACTOR.to_string()
            }
        }
    };

    let config: ExploreConfig =
        toml::from_str(&config_str).map_err(|e| format!("Failed to parse TOML config: {}", e))?;
    validate(&config)?;

    let data = common::latent_factor_dataset(
        config.data.samples,
        &config.data.loadings,
        config.data.noise_amplitude,
        config.data.seed,
    );

    println!();
    println!("Dataset: {} observations x {} variables", data.nrows(), data.ncols());
    println!();

    let scores = run_pca(&data, &config.pca)?;
    run_regressions(&data, &config.regression)?;

    if let Some(parent) = std::path::Path::new(&config.output.csv_path).parent() {
        fs::create_dir_all(parent)?;
    }
    write_csv(&data, &scores, &config.output.csv_path)?;

    println!();
    println!("Done!");
    println!("  CSV: {}", config.output.csv_path);

    Ok(())
}

// ============================================================================
// Config Loading
// ============================================================================

fn load_recipe(name: &str) -> Result<String, Box<dyn Error>> {
    match name {
        "two_factor" => Ok(RECIPE_TWO_FACTOR.to_string()),
        "collinear" => Ok(RECIPE_COLLINEAR.to_string()),
        "sparse" => Ok(RECIPE_SPARSE.to_string()),
        _ => Err(format!(
            "Unknown recipe '{}'. Available recipes: two_factor, collinear, sparse",
            name
        )
        .into()),
    }
}

fn validate(config: &ExploreConfig) -> Result<(), Box<dyn Error>> {
    let variables = config.data.loadings.len();
    if variables < 2 {
        return Err(format!("need at least 2 variables, got {}", variables).into());
    }
    if config.regression.target >= variables {
        return Err(format!(
            "regression target {} out of range for {} variables",
            config.regression.target, variables
        )
        .into());
    }
    Ok(())
}

// ============================================================================
// Analysis
// ============================================================================

fn run_pca(data: &Matrix<f64>, config: &PcaConfig) -> Result<Matrix<f64>, Box<dyn Error>> {
    let mut eigen_config = EigenConfig::default();
    if let Some(max_iterations) = config.max_iterations {
        eigen_config = eigen_config.with_max_iterations(max_iterations);
    }
    if let Some(tolerance) = config.tolerance {
        eigen_config = eigen_config.with_tolerance(tolerance);
    }

    let mut pca = PrincipalComponentAnalysis::new(config.components).with_eigen_config(eigen_config);
    let scores = pca.fit_transform(data)?;

    println!("PCA ({} components):", pca.number_of_components());
    for i in 0..pca.number_of_components() {
        println!(
            "  PC{}: variance {:>8.4}  ratio {:>6.2}%  axis {}",
            i + 1,
            pca.explained_variance()[i],
            100.0 * pca.explained_variance_ratio()[i],
            pca.components().row(i)
        );
    }
    println!();

    Ok(scores)
}

fn run_regressions(data: &Matrix<f64>, config: &RegressionConfig) -> Result<(), Box<dyn Error>> {
    let dependent = data.column(config.target);
    let columns: Vec<Vector<f64>> = (0..data.ncols())
        .filter(|&j| j != config.target)
        .map(|j| data.column(j))
        .collect();
    let independent = ValueTable::from_columns(columns)?;

    let mut ols = LinearRegression::new();
    ols.fit(&dependent, &independent)?;

    println!("OLS on column {} (r2 {:.4}, adjusted {:.4}):", config.target, ols.r2(), ols.adjusted_r2());
    println!("  {:>5} {:>10} {:>10} {:>10} {:>10}", "coef", "estimate", "std.err", "t", "p");
    for i in 0..ols.coefficients().len() {
        println!(
            "  {:>5} {:>10.4} {:>10.4} {:>10.3} {:>10.4}",
            i,
            ols.coefficients()[i],
            ols.standard_errors()[i],
            ols.t_values()[i],
            ols.p_values()[i]
        );
    }
    println!();

    println!("Lasso path:");
    for &complexity in &config.lasso_complexity {
        let mut lasso = LassoRegression::with_config(LassoConfig {
            complexity,
            ..Default::default()
        });
        lasso.fit(&dependent, &independent)?;
        lasso.test()?;
        println!(
            "  complexity {:>7.4}: coefficients {}  r2 {:.4}",
            complexity,
            lasso.coefficients(),
            lasso.r2()
        );
    }

    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn write_csv(data: &Matrix<f64>, scores: &Matrix<f64>, path: &str) -> Result<(), Box<dyn Error>> {
    let mut file = fs::File::create(path)?;

    let mut header: Vec<String> = (0..data.ncols()).map(|j| format!("x{}", j)).collect();
    header.extend((0..scores.ncols()).map(|j| format!("pc{}", j + 1)));
    writeln!(file, "{}", header.join(","))?;

    for i in 0..data.nrows() {
        let row: Vec<String> = data[i]
            .iter()
            .chain(scores[i].iter())
            .map(|v| format!("{:.6}", v))
            .collect();
        writeln!(file, "{}", row.join(","))?;
    }

    Ok(())
}
