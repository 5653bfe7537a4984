//! Проверка синтаксиса IPv4 (четыре октета через точку).

/// Строка вида `a.b.c.d`, где каждый октет — от 1 до 3 цифр в диапазоне 0..=255.
///
/// Ведущие нули допускаются (`010.0.0.1`), в отличие от [`std::net::Ipv4Addr`].
pub fn is_dotted_quad(ip: &str) -> bool {
    let mut octets = 0;
    for part in ip.split('.') {
        octets += 1;
        if octets > 4 || part.is_empty() || part.len() > 3 {
            return false;
        }
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match part.parse::<u16>() {
            Ok(value) if value <= 255 => {}
            _ => return false,
        }
    }
    octets == 4
}
