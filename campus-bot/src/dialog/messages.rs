//! User-facing texts and the keyboards of the registration flow.

use campus_core::{InlineButton, InlineKeyboard, OutgoingMessage};

pub const FACULTY_CALLBACK_PREFIX: &str = "faculty:";
pub const GROUP_CALLBACK_PREFIX: &str = "group:";

pub const GREETING: &str = "👋 Здравствуйте! Я бот расписания университета.\n\n\
Для начала работы зарегистрируйтесь: /register\n\
Если вы уже зарегистрированы: /login\n\
Список команд: /help";

pub const HELP: &str = "Доступные команды:\n\
/register – регистрация по коду\n\
/login – вход по коду и паролю\n\
/day [ГГГГ-ММ-ДД] – расписание на день\n\
/week [ГГГГ-ММ-ДД] – расписание на неделю\n\
/month [ГГГГ-ММ] – расписание на месяц\n\
/materials – материалы курсов\n\
/cancel – отменить текущее действие";

pub const UNKNOWN_COMMAND: &str = "Неизвестная команда. Список команд: /help";
pub const NO_STATE_HINT: &str = "Используйте /register для регистрации или /login для входа.";

pub const CHOOSE_FACULTY: &str = "Выберите факультет:";
pub const NO_FACULTIES: &str = "Список факультетов пуст. Обратитесь к администратору.";
pub const UNKNOWN_FACULTY: &str = "Такого факультета нет";
pub const NO_GROUPS: &str = "На этом факультете нет групп. Выберите другой факультет.";
pub const UNKNOWN_GROUP: &str = "Такой группы нет";
pub const USE_BUTTONS: &str = "Пожалуйста, выберите вариант с помощью кнопок выше.";

pub const ENTER_CODE: &str = "Введите регистрационный код:";
pub const EMPTY_CODE: &str = "Код не может быть пустым. Введите регистрационный код:";
pub const CODE_NOT_FOUND: &str =
    "Код не найден для выбранных факультета и группы, или он уже использован. Попробуйте ещё раз:";
pub const EMPTY_PASSWORD: &str = "Пароль не может быть пустым. Введите пароль:";
pub const REGISTRATION_STALE: &str =
    "Учётная запись уже занята или не найдена. Начните заново: /register";

pub const LOGIN_ENTER_CODE: &str = "Введите ваш регистрационный код:";
pub const LOGIN_CODE_NOT_FOUND: &str =
    "Пользователь с таким кодом не зарегистрирован. Начните заново: /login";
pub const LOGIN_ENTER_PASSWORD: &str = "Введите пароль:";
pub const WRONG_PASSWORD: &str = "Неверный пароль. Попробуйте ещё раз:";

pub const CANCELLED: &str = "Действие отменено.";
pub const NOTHING_TO_CANCEL: &str = "Нечего отменять.";

pub const STORE_ERROR: &str = "⚠️ Сервис временно недоступен. Попробуйте ещё раз чуть позже.";
pub const FLOW_ABORTED: &str = "Произошла внутренняя ошибка, действие прервано. Начните заново.";

pub const NOT_LOGGED_IN: &str = "Сначала войдите в систему: /register или /login";
pub const NOT_LOGGED_IN_TOAST: &str = "Сначала войдите в систему";
pub const DATE_FORMAT_HINT: &str = "Неверный формат даты. Пример: /day 2025-09-01";
pub const MONTH_FORMAT_HINT: &str = "Неверный формат месяца. Пример: /month 2025-09";
pub const PAGE_OUT_OF_RANGE: &str = "Такой страницы нет";

pub fn password_prompt(name: &str) -> String {
    format!("Найдено: {}. Придумайте пароль:", name)
}

pub fn registration_done(name: &str) -> String {
    format!("✅ Регистрация завершена. Добро пожаловать, {}!\nСписок команд: /help", name)
}

pub fn login_done(name: &str) -> String {
    format!("✅ Вход выполнен. Здравствуйте, {}!\nСписок команд: /help", name)
}

pub fn faculty_keyboard(faculties: &[String]) -> OutgoingMessage {
    OutgoingMessage::text(CHOOSE_FACULTY).with_keyboard(InlineKeyboard::single_column(
        faculties
            .iter()
            .map(|f| InlineButton::new(f.as_str(), format!("{}{}", FACULTY_CALLBACK_PREFIX, f))),
    ))
}

pub fn group_keyboard(faculty: &str, groups: &[String]) -> OutgoingMessage {
    OutgoingMessage::text(format!("{}\nВыберите группу:", faculty)).with_keyboard(
        InlineKeyboard::single_column(
            groups
                .iter()
                .map(|g| InlineButton::new(g.as_str(), format!("{}{}", GROUP_CALLBACK_PREFIX, g))),
        ),
    )
}
