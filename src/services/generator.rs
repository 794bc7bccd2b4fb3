//! # 산수 문제 생성기
//!
//! 라운드 번호에 따라 점점 어려워지는 산수 문제를 만듭니다.
//!
//! ## 난이도 곡선
//! | 라운드 | `+` / `-` 피연산자 | `×` 피연산자 | `÷` 몫 / 나누는 수 |
//! |--------|-------------------|-------------|-------------------|
//! | 1..=9  | 1..=min(5+r, 12)  | 1..=min(r+2, 10) | 1..=min(5+r, 12) / 1..=min(r+1, 8) |
//! | 10(보스) | 10..=25         | 5..=12      | 2..=10 / 2..=9 |
//!
//! 연산자는 보스 라운드를 포함해 모든 라운드에서 네 가지 중 균등하게 뽑습니다.
//!
//! 모든 함수는 `R: Rng + ?Sized`를 받으므로, 서버에서는 `rand::rng()`를,
//! 테스트에서는 시드를 고정한 `StdRng`를 넘겨 재현 가능한 문제를 만들 수 있습니다.

use rand::{seq::SliceRandom, Rng};

use crate::models::{is_boss_round, Operation, Question};

/// 오답 보기를 뽑는 최대 시도 횟수
const MAX_DISTRACTOR_ATTEMPTS: usize = 20;

/// 정답 외에 보여줄 오답 보기 개수
const DISTRACTOR_COUNT: usize = 2;

/// 라운드 번호(1 이상)에 맞는 문제를 하나 만듭니다. 실패하지 않습니다.
pub fn generate_question<R: Rng + ?Sized>(rng: &mut R, round_number: i64) -> Question {
    let operation = Operation::ALL[rng.random_range(0..Operation::ALL.len())];

    let (operand1, operand2, correct_answer) = if is_boss_round(round_number) {
        boss_operands(rng, operation)
    } else {
        regular_operands(rng, operation, round_number)
    };

    let mut options = vec![correct_answer];
    options.extend(distractors(rng, operation, correct_answer));
    // 섞인 순서가 그대로 화면 표시 순서가 됩니다
    options.shuffle(rng);

    Question {
        prompt: format!("{} {} {}", operand1, operation.symbol(), operand2),
        operation,
        correct_answer,
        options,
    }
}

/// 일반 라운드(1..=9)의 피연산자와 정답을 뽑습니다.
fn regular_operands<R: Rng + ?Sized>(
    rng: &mut R,
    operation: Operation,
    round_number: i64,
) -> (i64, i64, i64) {
    let max_number = (5 + round_number).min(12);

    match operation {
        Operation::Multiply => {
            let limit = (round_number + 2).min(10);
            let a = rng.random_range(1..=limit);
            let b = rng.random_range(1..=limit);
            (a, b, a * b)
        }
        Operation::Divide => {
            // 몫을 먼저 정하고 나눠지는 수를 곱으로 만들어 항상 나누어떨어지게 합니다
            let quotient = rng.random_range(1..=max_number);
            let divisor = rng.random_range(1..=(round_number + 1).min(8));
            (quotient * divisor, divisor, quotient)
        }
        Operation::Add | Operation::Subtract => {
            let a = rng.random_range(1..=max_number);
            let b = rng.random_range(1..=max_number);
            apply(operation, a, b)
        }
    }
}

/// 보스 라운드(10)의 피연산자와 정답을 뽑습니다.
fn boss_operands<R: Rng + ?Sized>(rng: &mut R, operation: Operation) -> (i64, i64, i64) {
    match operation {
        Operation::Multiply => {
            let a = rng.random_range(5..=12);
            let b = rng.random_range(5..=12);
            (a, b, a * b)
        }
        Operation::Divide => {
            let quotient = rng.random_range(2..=10);
            let divisor = rng.random_range(2..=9);
            (quotient * divisor, divisor, quotient)
        }
        Operation::Add | Operation::Subtract => {
            let a = rng.random_range(10..=25);
            let b = rng.random_range(10..=25);
            apply(operation, a, b)
        }
    }
}

/// 덧셈/뺄셈의 정답을 계산합니다.
///
/// 뺄셈은 결과가 음수가 되지 않도록 큰 수를 앞으로 보냅니다.
fn apply(operation: Operation, a: i64, b: i64) -> (i64, i64, i64) {
    match operation {
        Operation::Subtract => {
            let (a, b) = if a < b { (b, a) } else { (a, b) };
            (a, b, a - b)
        }
        _ => (a, b, a + b),
    }
}

/// 오답 후보를 뽑을 때 정답에서 벗어나는 최대 폭
fn distractor_spread(operation: Operation) -> i64 {
    match operation {
        Operation::Multiply => 20,
        Operation::Divide => 8,
        Operation::Add | Operation::Subtract => 10,
    }
}

/// 정답 근처의 서로 다른 양수 오답 2개를 만듭니다.
///
/// 무작위로 최대 20번 시도한 뒤에도 모자라면 `정답 + (현재 개수 + 1)`부터
/// 차례로 채워 넣습니다.
fn distractors<R: Rng + ?Sized>(rng: &mut R, operation: Operation, correct_answer: i64) -> Vec<i64> {
    let spread = distractor_spread(operation);
    let mut picked: Vec<i64> = Vec::with_capacity(DISTRACTOR_COUNT);

    for _ in 0..MAX_DISTRACTOR_ATTEMPTS {
        if picked.len() >= DISTRACTOR_COUNT {
            break;
        }
        let candidate = correct_answer + rng.random_range(-spread..=spread);
        if candidate > 0 && candidate != correct_answer && !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }

    pad_distractors(&mut picked, correct_answer);
    picked
}

/// 무작위로 모자란 오답을 `정답 + 1, 정답 + 2, ...` 순서로 채웁니다.
fn pad_distractors(picked: &mut Vec<i64>, correct_answer: i64) {
    let mut offset = picked.len() as i64 + 1;
    while picked.len() < DISTRACTOR_COUNT {
        let candidate = correct_answer + offset;
        if !picked.contains(&candidate) {
            picked.push(candidate);
        }
        offset += 1;
    }
}
