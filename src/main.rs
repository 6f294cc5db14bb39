//! Калькулятор матриц: командная строка поверх ядра

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use prettytable::{Cell, Row, Table};
use serde::Serialize;

use matrix_kernel::input::parse_matrix;
use matrix_kernel::matrix::{initialize_matrices, square, MatrixKind};
use matrix_kernel::narration::{self, Narration};
use matrix_kernel::utils::{compare_results, measure_time, round_to};
use matrix_kernel::{Matrix, MatrixKernel, Operation};

/// Допуск при проверке A * A^-1 = I
const DEMO_TOLERANCE: f64 = 1e-10;
const INVERSE_DECIMALS: u32 = 3;
const ELIMINATION_DECIMALS: u32 = 2;

#[derive(Parser)]
#[command(
    name = "matrix-calc",
    version,
    about = "Matrix calculator with step-by-step explanations"
)]
struct Cli {
    /// Подробный журнал (уровень debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Формат вывода
    #[arg(long, value_enum, default_value_t = Format::Table, global = true)]
    format: Format,

    /// Вывести журнал элементарных шагов
    #[arg(long, global = true)]
    steps: bool,

    /// Вывести пояснение по шагам
    #[arg(long, global = true)]
    explain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// A + B
    Add(BinaryInput),
    /// A - B
    Subtract(BinaryInput),
    /// A * B
    Multiply(BinaryInput),
    /// Транспонирование A
    Transpose(OperandA),
    /// Определитель A (2x2 или 3x3)
    Determinant(OperandA),
    /// Обратная матрица A (2x2 или 3x3)
    Inverse(OperandA),
    /// Метод Гаусса для A (2x2 или 3x3)
    Eliminate(OperandA),
    /// Все операции на сгенерированных матрицах
    Demo {
        /// Размер матриц: 2 или 3
        #[arg(long, default_value_t = 3)]
        size: usize,
    },
}

#[derive(Args)]
struct OperandA {
    /// Матрица A: строки через `;` или перевод строки, числа через пробел
    #[arg(
        short = 'a',
        long = "matrix-a",
        allow_hyphen_values = true,
        required_unless_present = "a_file",
        conflicts_with = "a_file"
    )]
    a: Option<String>,

    /// Файл с матрицей A
    #[arg(long = "matrix-a-file", value_name = "PATH")]
    a_file: Option<PathBuf>,
}

impl OperandA {
    fn rows(&self) -> Result<Vec<Vec<f64>>> {
        read_operand(self.a.as_deref(), self.a_file.as_deref())
    }
}

#[derive(Args)]
struct BinaryInput {
    #[command(flatten)]
    a: OperandA,

    /// Матрица B
    #[arg(
        short = 'b',
        long = "matrix-b",
        allow_hyphen_values = true,
        required_unless_present = "b_file",
        conflicts_with = "b_file"
    )]
    b: Option<String>,

    /// Файл с матрицей B
    #[arg(long = "matrix-b-file", value_name = "PATH")]
    b_file: Option<PathBuf>,
}

fn read_operand(inline: Option<&str>, file: Option<&Path>) -> Result<Vec<Vec<f64>>> {
    let text = match (inline, file) {
        (Some(text), _) => text.to_owned(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Не удалось прочитать файл {}", path.display()))?,
        (None, None) => String::new(),
    };
    Ok(parse_matrix(&text))
}

/// Итог одной команды для вывода
#[derive(Serialize)]
struct Report {
    operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Matrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    determinant: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<Narration>,
}

impl Report {
    fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            result: None,
            determinant: None,
            steps: Vec::new(),
            explanation: None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let kernel = MatrixKernel::new();
    let report = match &cli.command {
        Command::Add(input) => binary(&kernel, &cli, Operation::Add, input)?,
        Command::Subtract(input) => binary(&kernel, &cli, Operation::Subtract, input)?,
        Command::Multiply(input) => binary(&kernel, &cli, Operation::Multiply, input)?,
        Command::Transpose(input) => transpose(&kernel, &cli, input)?,
        Command::Determinant(input) => determinant(&kernel, &cli, input)?,
        Command::Inverse(input) => inverse(&kernel, &cli, input)?,
        Command::Eliminate(input) => eliminate(&kernel, &cli, input)?,
        Command::Demo { size } => return run_demo(&kernel, *size),
    };

    print_report(&report, cli.format)
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::default();
    builder
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("MATRIX_CALC_LOG", "warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn binary(kernel: &MatrixKernel, cli: &Cli, operation: Operation, input: &BinaryInput) -> Result<Report> {
    let a_rows = input.a.rows()?;
    let b_rows = read_operand(input.b.as_deref(), input.b_file.as_deref())?;

    let computation = kernel
        .apply(operation, &a_rows, &b_rows)
        .with_context(|| format!("Операция {operation} не выполнена"))?;

    let mut report = Report::new(operation.to_string());
    if cli.steps {
        report.steps = computation.steps.iter().map(ToString::to_string).collect();
    }
    if cli.explain {
        let a = Matrix::from_rows(&a_rows)?;
        let b = Matrix::from_rows(&b_rows)?;
        report.explanation = Some(narration::binary(operation, &a, &b, &computation.result));
    }
    report.result = Some(computation.result);
    Ok(report)
}

fn transpose(kernel: &MatrixKernel, cli: &Cli, input: &OperandA) -> Result<Report> {
    let rows = input.rows()?;
    let result = kernel
        .transpose(&rows)
        .context("Не удалось транспонировать матрицу")?;

    let mut report = Report::new("transpose");
    if cli.explain {
        report.explanation = Some(narration::transpose(&Matrix::from_rows(&rows)?, &result));
    }
    report.result = Some(result);
    Ok(report)
}

fn determinant(kernel: &MatrixKernel, cli: &Cli, input: &OperandA) -> Result<Report> {
    let rows = input.rows()?;
    let det = kernel
        .determinant(&rows)
        .context("Не удалось вычислить определитель")?;

    let mut report = Report::new("determinant");
    if cli.explain {
        report.explanation = Some(narration::determinant(&Matrix::from_rows(&rows)?, det));
    }
    report.determinant = Some(det);
    Ok(report)
}

fn inverse(kernel: &MatrixKernel, cli: &Cli, input: &OperandA) -> Result<Report> {
    let rows = input.rows()?;
    let inverse = kernel
        .inverse(&rows)
        .context("Не удалось вычислить обратную матрицу")?;

    let mut report = Report::new("inverse");
    if cli.explain {
        let a = Matrix::from_rows(&rows)?;
        let det = square::determinant(&a)?;
        let adjugate = square::adjugate(&a)?;
        report.explanation = Some(narration::inverse(&a, det, &adjugate, &inverse));
    }
    report.result = Some(round_to(&inverse, INVERSE_DECIMALS));
    Ok(report)
}

fn eliminate(kernel: &MatrixKernel, cli: &Cli, input: &OperandA) -> Result<Report> {
    let rows = input.rows()?;
    let reduction = kernel
        .row_reduce(&rows)
        .context("Метод Гаусса не применим")?;

    let mut report = Report::new("eliminate");
    if cli.steps {
        report.steps = reduction
            .row_operations
            .iter()
            .map(ToString::to_string)
            .collect();
    }
    if cli.explain {
        report.explanation = Some(narration::elimination(&Matrix::from_rows(&rows)?, &reduction));
    }
    report.result = Some(round_to(&reduction.result, ELIMINATION_DECIMALS));
    Ok(report)
}

fn print_report(report: &Report, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(report).context("Не удалось сериализовать результат")?;
            println!("{json}");
        }
        Format::Table => {
            if let Some(explanation) = &report.explanation {
                println!("{explanation}\n");
            }
            if !report.steps.is_empty() {
                println!("Шаги:");
                for (n, step) in report.steps.iter().enumerate() {
                    println!("{:>4}. {step}", n + 1);
                }
                println!();
            }
            if let Some(det) = report.determinant {
                println!("det(A) = {det}");
            }
            if let Some(result) = &report.result {
                let (rows, cols) = result.shape();
                println!("Результат ({rows}x{cols}):");
                print!("{}", matrix_table(result));
            }
        }
    }
    Ok(())
}

fn matrix_table(matrix: &Matrix) -> Table {
    let mut table = Table::new();
    for row in matrix.to_rows() {
        table.add_row(Row::new(
            row.iter().map(|v| Cell::new(&(v + 0.0).to_string())).collect(),
        ));
    }
    table
}

/// Прогон всех операций на сгенерированных матрицах с замером времени
fn run_demo(kernel: &MatrixKernel, size: usize) -> Result<()> {
    anyhow::ensure!(
        size == 2 || size == 3,
        "Размер матриц для демонстрации должен быть 2 или 3, получено {size}"
    );
    println!("Демонстрация операций над матрицами {size}x{size}");

    for kind in [MatrixKind::OnesAndTwos, MatrixKind::ThreesAndFours, MatrixKind::Random] {
        let (a, b) = initialize_matrices(kind, size, size)?;
        let a_rows = a.to_rows();
        let b_rows = b.to_rows();

        println!("\nМатрицы {kind:?}:");
        println!("A =\n{a}");
        println!("B =\n{b}");

        for operation in [Operation::Add, Operation::Subtract, Operation::Multiply] {
            let (computation, elapsed) = measure_time(|| kernel.apply(operation, &a_rows, &b_rows));
            let computation = computation?;
            println!(
                "{operation}: {} шагов за {elapsed:?}",
                computation.steps.len()
            );
        }

        let (transposed, elapsed) = measure_time(|| kernel.transpose(&a_rows));
        println!("transpose: {}x{} за {elapsed:?}", transposed?.n_rows(), size);

        let (det, elapsed) = measure_time(|| kernel.determinant(&a_rows));
        println!("det(A) = {} за {elapsed:?}", det?);

        match kernel.inverse(&a_rows) {
            Ok(inverse) => {
                let product = kernel.multiply(&a_rows, &inverse.to_rows())?.result;
                let matches = compare_results(&product, &Matrix::identity(size), DEMO_TOLERANCE);
                println!(
                    "A * A^-1 {} с единичной матрицей",
                    if matches { "совпадает" } else { "не совпадает" }
                );
            }
            Err(err) => println!("Обратная матрица не существует: {err}"),
        }

        match kernel.row_reduce(&a_rows) {
            Ok(reduction) => println!(
                "Метод Гаусса: {} преобразований строк\n{}",
                reduction.row_operations.len(),
                reduction.result
            ),
            Err(err) => println!("Метод Гаусса не применим: {err}"),
        }
    }

    println!("\nДемонстрация завершена.");
    Ok(())
}
